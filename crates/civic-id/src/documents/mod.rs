//! Citizen document wallet: status derivation, per-mode action rules, detail
//! rendering and the wallet service built on top of them.

pub mod actions;
pub mod display;
pub mod domain;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use actions::{
    permitted_actions, ActionSet, ActionState, ActionView, DocumentAction, READ_ONLY_DIALOG,
};
pub use display::{field_specs, render_details, validity_years, DetailView, DocumentFieldSpec};
pub use domain::{
    DocumentId, DocumentRecord, DocumentStatus, DocumentType, ExpiryDate, ViewMode,
    PERMANENT_EXPIRY,
};
pub use router::{wallet_router, WalletParams};
pub use service::{DocumentCard, DocumentWalletService, WalletError};
pub use status::{
    derive_status, DerivedStatus, DisplayStatus, StatusPalette, StatusPolicy, StatusTone,
    EXPIRING_SOON_WINDOW_DAYS,
};
