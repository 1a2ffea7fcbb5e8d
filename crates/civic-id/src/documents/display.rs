//! Static per-type display configuration for document details.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{DocumentType, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFieldSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub sensitive: bool,
}

const fn field(label: &'static str, key: &'static str, sensitive: bool) -> DocumentFieldSpec {
    DocumentFieldSpec {
        label,
        key,
        sensitive,
    }
}

const NATIONAL_ID_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("ID Number", "id_number", true),
    field("Date of Birth", "date_of_birth", true),
    field("Gender", "gender", false),
    field("Place of Birth", "place_of_birth", false),
    field("Issuing Authority", "issuing_authority", false),
];

const PASSPORT_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("Passport Number", "passport_number", true),
    field("Nationality", "nationality", false),
    field("Date of Birth", "date_of_birth", true),
    field("Place of Issue", "place_of_issue", false),
];

const DRIVERS_LICENSE_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("License Number", "license_number", true),
    field("License Class", "license_class", false),
    field("Restrictions", "restrictions", false),
    field("Issuing Authority", "issuing_authority", false),
];

const VOTERS_CARD_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("Voter ID", "voter_id", true),
    field("Polling Station", "polling_station", false),
    field("Constituency", "constituency", false),
];

const HEALTH_INSURANCE_FIELDS: &[DocumentFieldSpec] = &[
    field("Member Name", "member_name", false),
    field("Member Number", "member_number", true),
    field("Scheme", "scheme", false),
    field("Coverage", "coverage", false),
];

const BIRTH_CERTIFICATE_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("Certificate Number", "certificate_number", true),
    field("Date of Birth", "date_of_birth", true),
    field("Place of Birth", "place_of_birth", false),
    field("Registration District", "registration_district", false),
];

const STUDENT_ID_FIELDS: &[DocumentFieldSpec] = &[
    field("Student Name", "student_name", false),
    field("Student Number", "student_number", true),
    field("Institution", "institution", false),
    field("Programme", "programme", false),
];

const WORK_ID_FIELDS: &[DocumentFieldSpec] = &[
    field("Employee Name", "employee_name", false),
    field("Employee Number", "employee_number", true),
    field("Employer", "employer", false),
    field("Department", "department", false),
];

const RESIDENCE_PERMIT_FIELDS: &[DocumentFieldSpec] = &[
    field("Full Name", "full_name", false),
    field("Permit Number", "permit_number", true),
    field("Permit Category", "permit_category", false),
    field("Nationality", "nationality", false),
];

const LINKED_FIELDS: &[DocumentFieldSpec] = &[
    field("Holder Name", "holder_name", false),
    field("Reference Number", "reference_number", true),
    field("Issuer", "issuer", false),
];

pub fn field_specs(doc_type: &DocumentType) -> &'static [DocumentFieldSpec] {
    match doc_type {
        DocumentType::NationalId => NATIONAL_ID_FIELDS,
        DocumentType::Passport => PASSPORT_FIELDS,
        DocumentType::DriversLicense => DRIVERS_LICENSE_FIELDS,
        DocumentType::VotersCard => VOTERS_CARD_FIELDS,
        DocumentType::HealthInsuranceCard => HEALTH_INSURANCE_FIELDS,
        DocumentType::BirthCertificate => BIRTH_CERTIFICATE_FIELDS,
        DocumentType::StudentId => STUDENT_ID_FIELDS,
        DocumentType::WorkId => WORK_ID_FIELDS,
        DocumentType::ResidencePermit => RESIDENCE_PERMIT_FIELDS,
        DocumentType::Linked(_) => LINKED_FIELDS,
    }
}

/// Validity granted on issuance or renewal, in years. `None` means permanent.
pub fn validity_years(doc_type: &DocumentType) -> Option<u32> {
    match doc_type {
        DocumentType::NationalId => Some(10),
        DocumentType::Passport => Some(10),
        DocumentType::DriversLicense => Some(5),
        DocumentType::VotersCard => Some(10),
        DocumentType::HealthInsuranceCard => Some(1),
        DocumentType::BirthCertificate => None,
        DocumentType::StudentId => Some(4),
        DocumentType::WorkId => Some(2),
        DocumentType::ResidencePermit => Some(2),
        DocumentType::Linked(_) => Some(5),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub label: String,
    pub key: String,
    pub value: String,
    pub sensitive: bool,
    pub masked: bool,
}

/// Render details in configured order. Keys missing from the table follow, unmasked.
pub fn render_details(
    doc_type: &DocumentType,
    details: &BTreeMap<String, String>,
    mode: ViewMode,
) -> Vec<DetailView> {
    let specs = field_specs(doc_type);
    let reveal = mode == ViewMode::Service;

    let configured = specs.iter().filter_map(|spec| {
        details.get(spec.key).map(|value| {
            let masked = spec.sensitive && !reveal;
            DetailView {
                label: spec.label.to_string(),
                key: spec.key.to_string(),
                value: if masked {
                    mask_value(value)
                } else {
                    value.clone()
                },
                sensitive: spec.sensitive,
                masked,
            }
        })
    });

    let extra = details
        .iter()
        .filter(|(key, _)| !specs.iter().any(|spec| spec.key == key.as_str()))
        .map(|(key, value)| DetailView {
            label: humanize_key(key),
            key: key.clone(),
            value: value.clone(),
            sensitive: false,
            masked: false,
        });

    configured.chain(extra).collect()
}

pub fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let visible = if chars.len() > 4 { 4 } else { 0 };
    let hidden = chars.len() - visible;
    let mut masked = "•".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}

fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passport_details() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("full_name".to_string(), "Ama Mensah".to_string()),
            ("passport_number".to_string(), "G1234567".to_string()),
            ("nationality".to_string(), "Ghanaian".to_string()),
            ("blood_group".to_string(), "O+".to_string()),
        ])
    }

    #[test]
    fn masks_sensitive_fields_outside_service_mode() {
        let rendered = render_details(
            &DocumentType::Passport,
            &passport_details(),
            ViewMode::Readonly,
        );
        let number = rendered
            .iter()
            .find(|detail| detail.key == "passport_number")
            .expect("passport number rendered");
        assert!(number.masked);
        assert_eq!(number.value, "••••4567");

        let service = render_details(
            &DocumentType::Passport,
            &passport_details(),
            ViewMode::Service,
        );
        assert!(service
            .iter()
            .any(|detail| detail.key == "passport_number" && detail.value == "G1234567"));
    }

    #[test]
    fn renders_configured_fields_first_then_extras() {
        let rendered = render_details(
            &DocumentType::Passport,
            &passport_details(),
            ViewMode::Service,
        );
        let keys: Vec<&str> = rendered.iter().map(|detail| detail.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["full_name", "passport_number", "nationality", "blood_group"]
        );
        assert_eq!(rendered[3].label, "Blood Group");
    }

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_value("1234"), "••••");
        assert_eq!(mask_value(""), "");
    }

    #[test]
    fn birth_certificates_never_expire() {
        assert_eq!(validity_years(&DocumentType::BirthCertificate), None);
        assert_eq!(validity_years(&DocumentType::DriversLicense), Some(5));
    }
}
