use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::entities::{
    AccountStatus, AdminAccount, AdminRole, ApplicationKind, ApplicationStatus, AuditLogEntry,
    Complaint, ComplaintCategory, ComplaintStatus, LogCategory, LogSeverity, RecordId,
    ServiceApplication,
};

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read seed file {}: {}", path.display(), source)
            }
            ImportError::Csv(err) => write!(f, "invalid seed CSV data: {}", err),
            ImportError::Json(err) => write!(f, "invalid seed JSON data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Csv(err) => Some(err),
            ImportError::Json(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Records that can be hydrated from a seed CSV row.
pub trait CsvSeed: Sized {
    type Row: DeserializeOwned;

    /// File name looked up inside a seed directory.
    const FILE_NAME: &'static str;

    fn from_row(row: Self::Row) -> Self;
}

pub fn from_reader<T: CsvSeed, R: Read>(reader: R) -> Result<Vec<T>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<T::Row>() {
        records.push(T::from_row(row?));
    }
    Ok(records)
}

pub fn from_path<T: CsvSeed, P: AsRef<Path>>(path: P) -> Result<Vec<T>, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Load `<dir>/<T::FILE_NAME>` if present. A missing file yields `None`.
pub fn from_seed_dir<T: CsvSeed>(dir: &Path) -> Result<Option<Vec<T>>, ImportError> {
    let path = dir.join(T::FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    from_path(path).map(Some)
}

/// JSON array seeds, for records whose shape does not flatten into CSV columns.
pub fn from_json_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, ImportError> {
    serde_json::from_reader(reader).map_err(ImportError::Json)
}

pub fn from_json_seed_dir<T: DeserializeOwned>(
    dir: &Path,
    file_name: &str,
) -> Result<Option<Vec<T>>, ImportError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(&path).map_err(|source| ImportError::Io {
        path: path.clone(),
        source,
    })?;
    from_json_reader(file).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct ComplaintRow {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    submitter_id: String,
    submitter_name: String,
    category: ComplaintCategory,
    status: ComplaintStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    submitted_at: DateTime<Utc>,
}

impl CsvSeed for Complaint {
    type Row = ComplaintRow;
    const FILE_NAME: &'static str = "complaints.csv";

    fn from_row(row: ComplaintRow) -> Self {
        Complaint {
            id: RecordId(row.id),
            title: row.title,
            description: row.description,
            submitter_id: row.submitter_id,
            submitter_name: row.submitter_name,
            category: row.category,
            status: row.status,
            submitted_at: row.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRow {
    id: String,
    applicant_id: String,
    applicant_name: String,
    kind: ApplicationKind,
    reference_number: String,
    status: ApplicationStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    submitted_at: DateTime<Utc>,
}

impl CsvSeed for ServiceApplication {
    type Row = ApplicationRow;
    const FILE_NAME: &'static str = "applications.csv";

    fn from_row(row: ApplicationRow) -> Self {
        ServiceApplication {
            id: RecordId(row.id),
            applicant_id: row.applicant_id,
            applicant_name: row.applicant_name,
            kind: row.kind,
            reference_number: row.reference_number,
            status: row.status,
            submitted_at: row.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountRow {
    id: String,
    full_name: String,
    email: String,
    #[serde(default)]
    department: String,
    role: AdminRole,
    status: AccountStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: DateTime<Utc>,
}

impl CsvSeed for AdminAccount {
    type Row = AccountRow;
    const FILE_NAME: &'static str = "accounts.csv";

    fn from_row(row: AccountRow) -> Self {
        AdminAccount {
            id: RecordId(row.id),
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            role: row.role,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogRow {
    id: String,
    actor_id: String,
    actor_name: String,
    action: String,
    #[serde(default)]
    target: String,
    category: LogCategory,
    severity: LogSeverity,
    #[serde(deserialize_with = "deserialize_timestamp")]
    recorded_at: DateTime<Utc>,
}

impl CsvSeed for AuditLogEntry {
    type Row = LogRow;
    const FILE_NAME: &'static str = "logs.csv";

    fn from_row(row: LogRow) -> Self {
        AuditLogEntry {
            id: RecordId(row.id),
            actor_id: row.actor_id,
            actor_name: row.actor_name,
            action: row.action,
            target: row.target,
            category: row.category,
            severity: row.severity,
            recorded_at: row.recorded_at,
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD date"
        ))
    })
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
