use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::documents::domain::{
    DocumentId, DocumentRecord, DocumentStatus, DocumentType, ExpiryDate,
};
use crate::documents::service::DocumentWalletService;
use crate::documents::status::StatusPolicy;
use crate::records::ListingSettings;
use crate::repository::{InMemoryRepository, Repository, RepositoryError};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 12, 15)
}

pub(super) fn record(id: &str, status: DocumentStatus, expiry: &str) -> DocumentRecord {
    DocumentRecord {
        id: DocumentId(id.to_string()),
        holder_id: "citizen-001".to_string(),
        doc_type: DocumentType::NationalId,
        issue_date: date(2015, 1, 1),
        expiry_date: ExpiryDate::parse(expiry),
        status,
        details: BTreeMap::from([
            ("full_name".to_string(), "Kofi Boateng".to_string()),
            ("id_number".to_string(), "GHA-123456789-0".to_string()),
            ("issuing_authority".to_string(), "National Identification Authority".to_string()),
        ]),
    }
}

pub(super) fn wallet() -> Vec<DocumentRecord> {
    let mut passport = record("doc-passport", DocumentStatus::Active, "2025-01-01");
    passport.doc_type = DocumentType::Passport;
    passport.details = BTreeMap::from([
        ("full_name".to_string(), "Kofi Boateng".to_string()),
        ("passport_number".to_string(), "G4455667".to_string()),
        ("nationality".to_string(), "Ghanaian".to_string()),
    ]);

    let mut license = record("doc-license", DocumentStatus::Expired, "2020-01-01");
    license.doc_type = DocumentType::DriversLicense;
    license.details = BTreeMap::from([
        ("full_name".to_string(), "Kofi Boateng".to_string()),
        ("license_number".to_string(), "DL-884422".to_string()),
        ("license_class".to_string(), "B".to_string()),
    ]);

    let mut birth = record("doc-birth", DocumentStatus::Active, "Permanent");
    birth.doc_type = DocumentType::BirthCertificate;
    birth.details = BTreeMap::from([
        ("full_name".to_string(), "Kofi Boateng".to_string()),
        ("certificate_number".to_string(), "BC-1990-0042".to_string()),
    ]);

    let mut voter = record("doc-voter", DocumentStatus::Pending, "2034-06-30");
    voter.doc_type = DocumentType::VotersCard;
    voter.details = BTreeMap::from([
        ("full_name".to_string(), "Kofi Boateng".to_string()),
        ("polling_station".to_string(), "Osu Presby School".to_string()),
    ]);

    let mut other_holder = record("doc-other", DocumentStatus::Suspended, "2029-03-01");
    other_holder.holder_id = "citizen-002".to_string();
    other_holder.doc_type = DocumentType::WorkId;

    vec![
        record("doc-national", DocumentStatus::Active, "2031-08-20"),
        passport,
        license,
        birth,
        voter,
        other_holder,
    ]
}

pub(super) type MemoryDocuments = InMemoryRepository<DocumentRecord>;

pub(super) fn build_service() -> (
    DocumentWalletService<MemoryDocuments>,
    Arc<MemoryDocuments>,
) {
    let repository = Arc::new(InMemoryRepository::seeded(wallet()));
    let service = DocumentWalletService::new(
        repository.clone(),
        StatusPolicy::default(),
        ListingSettings::new(2, 50),
    );
    (service, repository)
}

pub(super) struct UnavailableDocuments;

impl Repository<DocumentRecord> for UnavailableDocuments {
    fn insert(&self, _record: DocumentRecord) -> Result<DocumentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: DocumentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DocumentId) -> Result<Option<DocumentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &DocumentId) -> Result<DocumentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify<E, F>(&self, _id: &DocumentId, _apply: F) -> Result<DocumentRecord, E>
    where
        F: FnOnce(&mut DocumentRecord) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
