use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::records::{
    AccountStatus, AdminAccount, AdminRole, Complaint, ComplaintCategory, ComplaintStatus,
    ListingService, ListingSettings, RecordId,
};
use crate::repository::{InMemoryRepository, Keyed, Repository, RepositoryError};

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn record_id(raw: &str) -> RecordId {
    RecordId(raw.to_string())
}

fn complaint(
    id: &str,
    title: &str,
    submitter: (&str, &str),
    category: ComplaintCategory,
    status: ComplaintStatus,
) -> Complaint {
    Complaint {
        id: record_id(id),
        title: title.to_string(),
        description: format!("Reported via citizen portal: {title}"),
        submitter_id: submitter.0.to_string(),
        submitter_name: submitter.1.to_string(),
        category,
        status,
        submitted_at: at(2024, 11, 2),
    }
}

pub(super) fn complaints() -> Vec<Complaint> {
    let ama = ("citizen-001", "Ama Mensah");
    let kwame = ("citizen-002", "Kwame Asante");
    vec![
        complaint(
            "cmp-001",
            "Broken streetlights on Ring Road",
            ama,
            ComplaintCategory::Infrastructure,
            ComplaintStatus::Pending,
        ),
        complaint(
            "cmp-002",
            "Delayed passport processing",
            kwame,
            ComplaintCategory::PublicServices,
            ComplaintStatus::InReview,
        ),
        complaint(
            "cmp-003",
            "Clinic out of essential drugs",
            ama,
            ComplaintCategory::Healthcare,
            ComplaintStatus::Resolved,
        ),
        complaint(
            "cmp-004",
            "Bribe requested at licensing office",
            ("citizen-003", "Yaw Owusu"),
            ComplaintCategory::Corruption,
            ComplaintStatus::Pending,
        ),
        complaint(
            "cmp-005",
            "School roof leaking",
            ("citizen-004", "Efua Darko"),
            ComplaintCategory::Education,
            ComplaintStatus::Rejected,
        ),
        complaint(
            "cmp-006",
            "Potholes near Makola market",
            kwame,
            ComplaintCategory::Infrastructure,
            ComplaintStatus::InReview,
        ),
    ]
}

pub(super) fn accounts() -> Vec<AdminAccount> {
    let account = |id: &str, name: &str, department: &str, role, status| AdminAccount {
        id: record_id(id),
        full_name: name.to_string(),
        email: format!("{}@civic.gov.gh", id),
        department: department.to_string(),
        role,
        status,
        created_at: at(2023, 6, 1),
    };

    vec![
        account(
            "adm-001",
            "Abena Ofori",
            "Identity Services",
            AdminRole::SuperAdmin,
            AccountStatus::Active,
        ),
        account(
            "adm-002",
            "Kojo Badu",
            "Electoral Commission",
            AdminRole::Moderator,
            AccountStatus::Suspended,
        ),
        account(
            "adm-003",
            "Esi Quaye",
            "Identity Services",
            AdminRole::Analyst,
            AccountStatus::Deactivated,
        ),
    ]
}

pub(super) type MemoryComplaints = InMemoryRepository<Complaint>;

pub(super) fn complaint_service() -> (
    ListingService<Complaint, MemoryComplaints>,
    Arc<MemoryComplaints>,
) {
    let repository = Arc::new(InMemoryRepository::seeded(complaints()));
    let service = ListingService::new(repository.clone(), ListingSettings::new(4, 5));
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl<T: Keyed> Repository<T> for UnavailableRepository {
    fn insert(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: T) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _key: &T::Key) -> Result<Option<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _key: &T::Key) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify<E, F>(&self, _key: &T::Key, _apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }
}

pub(super) fn ids<T: Keyed<Key = RecordId>>(records: &[T]) -> Vec<&str> {
    records.iter().map(|record| record.key().0.as_str()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
