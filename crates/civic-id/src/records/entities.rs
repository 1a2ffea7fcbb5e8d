use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::Searchable;
use super::workflow::StatusWorkflow;
use crate::repository::Keyed;

/// Identifier wrapper shared by every admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Records whose status an administrator can move through a workflow.
pub trait Tracked: Searchable + Keyed<Key = RecordId> {
    fn set_status(&mut self, status: Self::Status);
}

// Complaints

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InReview,
    Resolved,
    Rejected,
}

impl StatusWorkflow for ComplaintStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            ComplaintStatus::Pending => &[ComplaintStatus::InReview],
            ComplaintStatus::InReview => &[ComplaintStatus::Resolved, ComplaintStatus::Rejected],
            ComplaintStatus::Resolved => &[],
            ComplaintStatus::Rejected => &[ComplaintStatus::Pending],
        }
    }

    fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InReview => "in_review",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    PublicServices,
    Infrastructure,
    Corruption,
    Healthcare,
    Education,
    Security,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub submitter_id: String,
    pub submitter_name: String,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Keyed for Complaint {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Complaint {
    type Status = ComplaintStatus;
    type Category = ComplaintCategory;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str(), self.submitter_name.as_str()]
    }

    fn status(&self) -> ComplaintStatus {
        self.status
    }

    fn category(&self) -> ComplaintCategory {
        self.category
    }

    fn owner_id(&self) -> Option<&str> {
        Some(self.submitter_id.as_str())
    }
}

impl Tracked for Complaint {
    fn set_status(&mut self, status: ComplaintStatus) {
        self.status = status;
    }
}

// Service applications

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    NeedsMoreInfo,
    Approved,
    Rejected,
}

impl StatusWorkflow for ApplicationStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            ApplicationStatus::Pending => &[ApplicationStatus::UnderReview],
            ApplicationStatus::UnderReview => &[
                ApplicationStatus::Approved,
                ApplicationStatus::Rejected,
                ApplicationStatus::NeedsMoreInfo,
            ],
            ApplicationStatus::NeedsMoreInfo | ApplicationStatus::Rejected => {
                &[ApplicationStatus::Pending]
            }
            ApplicationStatus::Approved => &[],
        }
    }

    fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::NeedsMoreInfo => "needs_more_info",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    NationalId,
    Passport,
    DriversLicense,
    VoterRegistration,
    BirthCertificate,
    ResidencePermit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceApplication {
    pub id: RecordId,
    pub applicant_id: String,
    pub applicant_name: String,
    pub kind: ApplicationKind,
    pub reference_number: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Keyed for ServiceApplication {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for ServiceApplication {
    type Status = ApplicationStatus;
    type Category = ApplicationKind;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.applicant_name.as_str(), self.reference_number.as_str(), self.id.0.as_str()]
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn category(&self) -> ApplicationKind {
        self.kind
    }

    fn owner_id(&self) -> Option<&str> {
        Some(self.applicant_id.as_str())
    }
}

impl Tracked for ServiceApplication {
    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }
}

// Admin accounts

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Deactivated,
}

impl StatusWorkflow for AccountStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            AccountStatus::Active => &[AccountStatus::Suspended, AccountStatus::Deactivated],
            AccountStatus::Suspended => &[AccountStatus::Active, AccountStatus::Deactivated],
            AccountStatus::Deactivated => &[AccountStatus::Active],
        }
    }

    fn label(self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Deactivated => "deactivated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
    Analyst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: AdminRole,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl Keyed for AdminAccount {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for AdminAccount {
    type Status = AccountStatus;
    type Category = AdminRole;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.email.as_str(), self.department.as_str()]
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn category(&self) -> AdminRole {
        self.role
    }
}

impl Tracked for AdminAccount {
    fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}

// Audit log

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    Authentication,
    AccountManagement,
    DocumentIssuance,
    Voting,
    Complaints,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: RecordId,
    pub actor_id: String,
    pub actor_name: String,
    pub action: String,
    pub target: String,
    pub category: LogCategory,
    pub severity: LogSeverity,
    pub recorded_at: DateTime<Utc>,
}

impl Keyed for AuditLogEntry {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for AuditLogEntry {
    type Status = LogSeverity;
    type Category = LogCategory;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.actor_name.as_str(), self.action.as_str(), self.target.as_str()]
    }

    fn status(&self) -> LogSeverity {
        self.severity
    }

    fn category(&self) -> LogCategory {
        self.category
    }

    fn owner_id(&self) -> Option<&str> {
        Some(self.actor_id.as_str())
    }
}
