use chrono::NaiveDate;
use civic_id::documents::{DocumentRecord, ViewMode};
use civic_id::error::AppError;
use civic_id::records::import::{from_json_seed_dir, from_seed_dir};
use civic_id::records::{
    AdminAccount, AuditLogEntry, Complaint, CsvSeed, ImportError, ServiceApplication,
};
use civic_id::repository::{InMemoryRepository, Keyed};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

use crate::fixtures;

const DOCUMENTS_FILE: &str = "documents.json";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One in-memory repository per collection the service exposes.
pub(crate) struct Stores {
    pub(crate) documents: Arc<InMemoryRepository<DocumentRecord>>,
    pub(crate) complaints: Arc<InMemoryRepository<Complaint>>,
    pub(crate) applications: Arc<InMemoryRepository<ServiceApplication>>,
    pub(crate) accounts: Arc<InMemoryRepository<AdminAccount>>,
    pub(crate) logs: Arc<InMemoryRepository<AuditLogEntry>>,
}

impl Stores {
    /// Seed from `seed_dir` where a file exists, otherwise from the built-in fixtures.
    pub(crate) fn load(seed_dir: Option<&Path>) -> Result<Self, AppError> {
        let documents = match seed_dir {
            Some(dir) => from_json_seed_dir::<DocumentRecord>(dir, DOCUMENTS_FILE)?,
            None => None,
        };
        let documents = seeded("documents", documents, fixtures::documents)?;

        Ok(Self {
            documents,
            complaints: seeded_csv(seed_dir, fixtures::complaints)?,
            applications: seeded_csv(seed_dir, fixtures::applications)?,
            accounts: seeded_csv(seed_dir, fixtures::accounts)?,
            logs: seeded_csv(seed_dir, fixtures::logs)?,
        })
    }
}

fn seeded_csv<T>(
    seed_dir: Option<&Path>,
    fallback: fn() -> Result<Vec<T>, ImportError>,
) -> Result<Arc<InMemoryRepository<T>>, AppError>
where
    T: CsvSeed + Keyed + Clone,
{
    let imported = match seed_dir {
        Some(dir) => from_seed_dir::<T>(dir)?,
        None => None,
    };
    seeded(T::FILE_NAME, imported, fallback)
}

fn seeded<T>(
    source: &str,
    imported: Option<Vec<T>>,
    fallback: fn() -> Result<Vec<T>, ImportError>,
) -> Result<Arc<InMemoryRepository<T>>, AppError>
where
    T: Keyed + Clone,
{
    let records = match imported {
        Some(records) => {
            info!(source, count = records.len(), "loaded seed file");
            records
        }
        None => fallback()?,
    };
    Ok(Arc::new(InMemoryRepository::seeded(records)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_mode(raw: &str) -> Result<ViewMode, String> {
    let label = raw.trim().to_ascii_lowercase().replace(['-', '_'], "");
    serde_json::from_value(serde_json::Value::String(label))
        .map_err(|_| format!("unknown view mode '{raw}' (expected service, readonly or print)"))
}
