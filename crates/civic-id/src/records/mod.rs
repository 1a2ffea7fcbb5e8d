//! Admin record listings: complaints, service applications, admin accounts and the
//! audit log, all served through one filter/paginate engine parameterized by each
//! entity's searchable fields.

pub mod entities;
pub mod import;
pub mod listing;
pub mod query;
pub mod router;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use entities::{
    AccountStatus, AdminAccount, AdminRole, ApplicationKind, ApplicationStatus, AuditLogEntry,
    Complaint, ComplaintCategory, ComplaintStatus, LogCategory, LogSeverity, RecordId,
    ServiceApplication, Tracked,
};
pub use import::{CsvSeed, ImportError};
pub use listing::{assemble, Listing, ListingError, ListingService, ListingSettings, PageRequest};
pub use query::{
    clamp_page, count_by_status, filter, paginate, FieldFilter, InvalidFilter, Page, RecordQuery,
    Searchable, ALL_SENTINEL,
};
pub use router::{listing_router, tracked_router, ListingParams};
pub use workflow::{transition, StatusWorkflow, TransitionError};
