//! Built-in seed data served when no seed directory is configured.

use civic_id::documents::DocumentRecord;
use civic_id::records::import::{from_json_reader, from_reader};
use civic_id::records::{AdminAccount, AuditLogEntry, Complaint, ImportError, ServiceApplication};

const DOCUMENTS_JSON: &str = r#"[
  {
    "id": "doc-001",
    "holder_id": "citizen-001",
    "doc_type": "national_id",
    "issue_date": "2021-08-20",
    "expiry_date": "2031-08-20",
    "status": "active",
    "details": {
      "full_name": "Kofi Mensah Boateng",
      "id_number": "GHA-723456789-0",
      "date_of_birth": "1988-03-14",
      "gender": "Male",
      "place_of_birth": "Kumasi",
      "issuing_authority": "National Identification Authority"
    }
  },
  {
    "id": "doc-002",
    "holder_id": "citizen-001",
    "doc_type": "passport",
    "issue_date": "2015-01-02",
    "expiry_date": "2025-01-01",
    "status": "active",
    "details": {
      "full_name": "Kofi Mensah Boateng",
      "passport_number": "G4455667",
      "nationality": "Ghanaian",
      "date_of_birth": "1988-03-14",
      "place_of_issue": "Accra"
    }
  },
  {
    "id": "doc-003",
    "holder_id": "citizen-001",
    "doc_type": "drivers_license",
    "issue_date": "2015-01-01",
    "expiry_date": "2020-01-01",
    "status": "expired",
    "details": {
      "full_name": "Kofi Mensah Boateng",
      "license_number": "DL-884422",
      "license_class": "B",
      "issuing_authority": "Driver and Vehicle Licensing Authority"
    }
  },
  {
    "id": "doc-004",
    "holder_id": "citizen-001",
    "doc_type": "birth_certificate",
    "issue_date": "1988-04-02",
    "expiry_date": "Permanent",
    "status": "active",
    "details": {
      "full_name": "Kofi Mensah Boateng",
      "certificate_number": "BC-1988-00412",
      "date_of_birth": "1988-03-14",
      "place_of_birth": "Komfo Anokye Teaching Hospital",
      "registration_district": "Kumasi Metropolitan"
    }
  },
  {
    "id": "doc-005",
    "holder_id": "citizen-001",
    "doc_type": "voters_card",
    "issue_date": "2024-06-30",
    "expiry_date": "2034-06-30",
    "status": "pending",
    "details": {
      "full_name": "Kofi Mensah Boateng",
      "voter_id": "VT-5521098",
      "polling_station": "Osu Presby School",
      "constituency": "Korle Klottey"
    }
  },
  {
    "id": "doc-006",
    "holder_id": "citizen-001",
    "doc_type": "health_insurance_card",
    "issue_date": "2024-02-10",
    "expiry_date": "2025-02-10",
    "status": "active",
    "details": {
      "member_name": "Kofi Mensah Boateng",
      "member_number": "NHIS-00981234",
      "scheme": "National Health Insurance Scheme",
      "coverage": "Standard"
    }
  },
  {
    "id": "doc-007",
    "holder_id": "citizen-002",
    "doc_type": "work_id",
    "issue_date": "2023-03-01",
    "expiry_date": "2025-03-01",
    "status": "suspended",
    "details": {
      "employee_name": "Ama Serwaa Owusu",
      "employee_number": "EMP-20931",
      "employer": "Ghana Revenue Authority",
      "department": "Domestic Tax"
    }
  }
]"#;

const COMPLAINTS_CSV: &str = "\
id,title,description,submitter_id,submitter_name,category,status,submitted_at
cmp-001,Broken streetlights on Ring Road,Lights out for three weeks near the overpass,citizen-001,Kofi Mensah Boateng,infrastructure,pending,2024-11-02T09:30:00Z
cmp-002,Delayed passport processing,Application pending for four months,citizen-002,Ama Serwaa Owusu,public_services,in_review,2024-10-18T14:05:00Z
cmp-003,Clinic out of essential drugs,Regional clinic has no malaria medication,citizen-003,Yaw Darko,healthcare,resolved,2024-09-27T11:00:00Z
cmp-004,Bribe requested at licensing office,Officer demanded payment to skip the queue,citizen-004,Efua Asante,corruption,pending,2024-11-05T08:45:00Z
cmp-005,School roof leaking,Classrooms flood during rain,citizen-005,Kwame Nkansah,education,rejected,2024-08-12T16:20:00Z
cmp-006,Potholes near Makola market,Road damage causing accidents,citizen-002,Ama Serwaa Owusu,infrastructure,in_review,2024-11-09T07:10:00Z
";

const APPLICATIONS_CSV: &str = "\
id,applicant_id,applicant_name,kind,reference_number,status,submitted_at
app-001,citizen-001,Kofi Mensah Boateng,passport,PPT-2024-001245,under_review,2024-11-01
app-002,citizen-002,Ama Serwaa Owusu,national_id,NIA-2024-083311,pending,2024-11-04
app-003,citizen-003,Yaw Darko,drivers_license,DVLA-2024-000918,needs_more_info,2024-10-22
app-004,citizen-004,Efua Asante,voter_registration,EC-2024-114502,approved,2024-07-15
app-005,citizen-005,Kwame Nkansah,birth_certificate,BDR-2024-006731,rejected,2024-09-03
app-006,citizen-006,Abena Frimpong,residence_permit,GIS-2024-000377,pending,2024-11-08
";

const ACCOUNTS_CSV: &str = "\
id,full_name,email,department,role,status,created_at
adm-001,Abena Ofori,abena.ofori@civic.gov.gh,Identity Services,super_admin,active,2023-01-10
adm-002,Kojo Badu,kojo.badu@civic.gov.gh,Electoral Commission,moderator,suspended,2023-04-22
adm-003,Esi Quaye,esi.quaye@civic.gov.gh,Identity Services,analyst,deactivated,2023-06-01
adm-004,Nii Armah,nii.armah@civic.gov.gh,Public Complaints Unit,admin,active,2024-02-14
";

const LOGS_CSV: &str = "\
id,actor_id,actor_name,action,target,category,severity,recorded_at
log-001,adm-001,Abena Ofori,Signed in,admin console,authentication,info,2024-11-10T08:00:00Z
log-002,adm-001,Abena Ofori,Suspended account,adm-002,account_management,warning,2024-11-10T08:12:00Z
log-003,adm-004,Nii Armah,Moved complaint to review,cmp-002,complaints,info,2024-11-10T09:41:00Z
log-004,system,Issuance Service,Batch issuance failed,national_id queue,document_issuance,critical,2024-11-10T10:05:00Z
log-005,adm-003,Esi Quaye,Repeated failed sign-in,admin console,authentication,warning,2024-11-10T11:30:00Z
log-006,system,Ballot Service,Results tally published,constituency Korle Klottey,voting,info,2024-11-10T18:00:00Z
";

pub(crate) fn documents() -> Result<Vec<DocumentRecord>, ImportError> {
    from_json_reader(DOCUMENTS_JSON.as_bytes())
}

pub(crate) fn complaints() -> Result<Vec<Complaint>, ImportError> {
    from_reader(COMPLAINTS_CSV.as_bytes())
}

pub(crate) fn applications() -> Result<Vec<ServiceApplication>, ImportError> {
    from_reader(APPLICATIONS_CSV.as_bytes())
}

pub(crate) fn accounts() -> Result<Vec<AdminAccount>, ImportError> {
    from_reader(ACCOUNTS_CSV.as_bytes())
}

pub(crate) fn logs() -> Result<Vec<AuditLogEntry>, ImportError> {
    from_reader(LOGS_CSV.as_bytes())
}
