use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repository::Keyed;

/// Sentinel stored in place of an expiry date for credentials that never lapse.
pub const PERMANENT_EXPIRY: &str = "Permanent";

/// Identifier wrapper for wallet documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential kinds known to the platform. Dynamically linked credentials keep their
/// issuer-provided name, which is also their wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    NationalId,
    Passport,
    DriversLicense,
    VotersCard,
    HealthInsuranceCard,
    BirthCertificate,
    StudentId,
    WorkId,
    ResidencePermit,
    Linked(String),
}

impl DocumentType {
    pub fn label(&self) -> &str {
        match self {
            DocumentType::NationalId => "National ID",
            DocumentType::Passport => "Passport",
            DocumentType::DriversLicense => "Driver's License",
            DocumentType::VotersCard => "Voter's Card",
            DocumentType::HealthInsuranceCard => "Health Insurance Card",
            DocumentType::BirthCertificate => "Birth Certificate",
            DocumentType::StudentId => "Student ID",
            DocumentType::WorkId => "Work ID",
            DocumentType::ResidencePermit => "Residence Permit",
            DocumentType::Linked(name) => name.as_str(),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            DocumentType::NationalId => "national_id",
            DocumentType::Passport => "passport",
            DocumentType::DriversLicense => "drivers_license",
            DocumentType::VotersCard => "voters_card",
            DocumentType::HealthInsuranceCard => "health_insurance_card",
            DocumentType::BirthCertificate => "birth_certificate",
            DocumentType::StudentId => "student_id",
            DocumentType::WorkId => "work_id",
            DocumentType::ResidencePermit => "residence_permit",
            DocumentType::Linked(name) => name.as_str(),
        }
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        match value.trim() {
            "national_id" => DocumentType::NationalId,
            "passport" => DocumentType::Passport,
            "drivers_license" => DocumentType::DriversLicense,
            "voters_card" => DocumentType::VotersCard,
            "health_insurance_card" => DocumentType::HealthInsuranceCard,
            "birth_certificate" => DocumentType::BirthCertificate,
            "student_id" => DocumentType::StudentId,
            "work_id" => DocumentType::WorkId,
            "residence_permit" => DocumentType::ResidencePermit,
            linked => DocumentType::Linked(linked.to_string()),
        }
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.wire_name().to_string()
    }
}

/// Lifecycle flag persisted on the record. Unrecognized flags deserialize to `Unknown`
/// and render with the neutral palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Active,
    Expired,
    Pending,
    Suspended,
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Suspended => "suspended",
            DocumentStatus::Unknown => "unknown",
        }
    }
}

/// Stored expiry value. Kept as a tri-state so malformed input survives a round trip
/// instead of failing deserialization of the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpiryDate {
    Permanent,
    On(NaiveDate),
    Unparsed(String),
}

const ACCEPTED_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%B %d, %Y"];

impl ExpiryDate {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(PERMANENT_EXPIRY) {
            return ExpiryDate::Permanent;
        }

        ACCEPTED_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(ExpiryDate::On)
            .unwrap_or_else(|| ExpiryDate::Unparsed(raw.to_string()))
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, ExpiryDate::Permanent)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ExpiryDate::On(date) => Some(*date),
            _ => None,
        }
    }
}

impl From<String> for ExpiryDate {
    fn from(value: String) -> Self {
        ExpiryDate::parse(&value)
    }
}

impl From<ExpiryDate> for String {
    fn from(value: ExpiryDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryDate::Permanent => f.write_str(PERMANENT_EXPIRY),
            ExpiryDate::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ExpiryDate::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// Credential held in a citizen's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub holder_id: String,
    pub doc_type: DocumentType,
    pub issue_date: NaiveDate,
    pub expiry_date: ExpiryDate,
    pub status: DocumentStatus,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl DocumentRecord {
    /// Stored status with the permanence invariant applied: a permanent credential is
    /// never treated as expired.
    pub fn effective_status(&self) -> DocumentStatus {
        if self.expiry_date.is_permanent() && self.status == DocumentStatus::Expired {
            DocumentStatus::Active
        } else {
            self.status
        }
    }
}

impl Keyed for DocumentRecord {
    type Key = DocumentId;

    fn key(&self) -> &DocumentId {
        &self.id
    }
}

/// Operating context of the screen rendering a document card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Service,
    Readonly,
    Print,
}

impl ViewMode {
    pub const fn label(self) -> &'static str {
        match self {
            ViewMode::Service => "service",
            ViewMode::Readonly => "readonly",
            ViewMode::Print => "print",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_parses_sentinel_and_supported_formats() {
        assert_eq!(ExpiryDate::parse("Permanent"), ExpiryDate::Permanent);
        assert_eq!(ExpiryDate::parse(" permanent "), ExpiryDate::Permanent);

        let expected = NaiveDate::from_ymd_opt(2030, 5, 15).expect("valid date");
        assert_eq!(ExpiryDate::parse("2030-05-15").date(), Some(expected));
        assert_eq!(ExpiryDate::parse("15/05/2030").date(), Some(expected));
        assert_eq!(ExpiryDate::parse("May 15, 2030").date(), Some(expected));
    }

    #[test]
    fn malformed_expiry_is_kept_verbatim() {
        let parsed = ExpiryDate::parse("sometime next year");
        assert_eq!(
            parsed,
            ExpiryDate::Unparsed("sometime next year".to_string())
        );
        assert_eq!(parsed.to_string(), "sometime next year");
    }

    #[test]
    fn record_deserializes_with_string_expiry_and_unknown_status() {
        let record: DocumentRecord = serde_json::from_value(serde_json::json!({
            "id": "doc-1",
            "holder_id": "citizen-1",
            "doc_type": "birth_certificate",
            "issue_date": "1990-04-12",
            "expiry_date": "Permanent",
            "status": "archived",
        }))
        .expect("record deserializes");

        assert_eq!(record.expiry_date, ExpiryDate::Permanent);
        assert_eq!(record.status, DocumentStatus::Unknown);
        assert!(record.details.is_empty());

        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(value["expiry_date"], "Permanent");
    }

    #[test]
    fn document_type_wire_form_keeps_linked_names() {
        let linked: DocumentType = serde_json::from_value(serde_json::json!("Ghana Card"))
            .expect("linked type deserializes");
        assert_eq!(linked, DocumentType::Linked("Ghana Card".to_string()));
        assert_eq!(serde_json::to_value(&linked).expect("serializes"), "Ghana Card");

        let known: DocumentType =
            serde_json::from_value(serde_json::json!("drivers_license")).expect("deserializes");
        assert_eq!(known, DocumentType::DriversLicense);
        assert_eq!(
            serde_json::to_value(DocumentType::HealthInsuranceCard).expect("serializes"),
            "health_insurance_card"
        );
    }

    #[test]
    fn permanent_records_never_report_expired() {
        let record = DocumentRecord {
            id: DocumentId("doc-2".to_string()),
            holder_id: "citizen-1".to_string(),
            doc_type: DocumentType::BirthCertificate,
            issue_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            expiry_date: ExpiryDate::Permanent,
            status: DocumentStatus::Expired,
            details: BTreeMap::new(),
        };

        assert_eq!(record.effective_status(), DocumentStatus::Active);
    }
}
