//! End-to-end coverage of the admin record listings.
//!
//! Seeds come through the CSV importer, then flow through the listing service and router,
//! covering search, filter, pagination and status workflow enforcement end to end.

mod common {
    use std::sync::Arc;

    use civic_id::records::import::from_reader;
    use civic_id::records::{ListingService, ListingSettings, ServiceApplication};
    use civic_id::repository::InMemoryRepository;

    const APPLICATIONS_CSV: &str = "\
id,applicant_id,applicant_name,kind,reference_number,status,submitted_at
app-1,citizen-1,Kwabena Ofori,passport,PPT-001,pending,2024-10-01
app-2,citizen-2,Adwoa Boakye,national_id,NIA-002,under_review,2024-10-02
app-3,citizen-1,Kwabena Ofori,drivers_license,DVLA-003,needs_more_info,2024-10-03
app-4,citizen-3,Yaw Antwi,passport,PPT-004,approved,2024-10-04
app-5,citizen-4,Akua Sarfo,residence_permit,GIS-005,rejected,2024-10-05
app-6,citizen-2,Adwoa Boakye,passport,PPT-006,under_review,2024-10-06
app-7,citizen-5,Kofi Annan,birth_certificate,BDR-007,pending,2024-10-07
";

    pub(super) type Applications = InMemoryRepository<ServiceApplication>;

    pub(super) fn service() -> Arc<ListingService<ServiceApplication, Applications>> {
        let records: Vec<ServiceApplication> =
            from_reader(APPLICATIONS_CSV.as_bytes()).expect("seed parses");
        Arc::new(ListingService::new(
            Arc::new(InMemoryRepository::seeded(records)),
            ListingSettings::new(3, 25),
        ))
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use civic_id::records::{
    tracked_router, ApplicationKind, ApplicationStatus, FieldFilter, ListingError, PageRequest,
    RecordId, RecordQuery,
};
use common::*;
use serde_json::Value;
use tower::ServiceExt;

async fn call(request: Request<Body>) -> (StatusCode, Value) {
    let response = tracked_router("/api/v1/admin/applications", service())
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

#[test]
fn pages_walk_the_filtered_collection_in_seed_order() {
    let service = service();
    let query = RecordQuery {
        category: FieldFilter::Only(ApplicationKind::Passport),
        ..RecordQuery::default()
    };

    let first = service
        .list(&query, PageRequest::default())
        .expect("listing builds");
    assert_eq!(first.total_items, 3);
    assert_eq!(first.total_pages, 1);
    let references: Vec<&str> = first
        .items
        .iter()
        .map(|item| item.reference_number.as_str())
        .collect();
    assert_eq!(references, vec!["PPT-001", "PPT-004", "PPT-006"]);

    let everything = service
        .list(
            &RecordQuery::default(),
            PageRequest {
                page: Some(3),
                page_size: None,
            },
        )
        .expect("listing builds");
    assert_eq!(everything.total_pages, 3);
    assert_eq!(everything.items.len(), 1);
    assert_eq!(everything.items[0].id, RecordId("app-7".to_string()));
    assert_eq!(
        everything.status_counts.get(&ApplicationStatus::UnderReview),
        Some(&2)
    );
}

#[test]
fn applicant_search_matches_name_reference_and_id() {
    let service = service();

    for (term, expected) in [("ofori", 2), ("dvla-003", 1), ("APP-5", 1), ("zzz", 0)] {
        let query = RecordQuery {
            search_term: term.to_string(),
            ..RecordQuery::default()
        };
        let listing = service
            .list(&query, PageRequest::default())
            .expect("listing builds");
        assert_eq!(listing.total_items, expected, "search '{term}'");
    }
}

#[test]
fn resubmission_cycle_follows_the_workflow() {
    let service = service();
    let id = RecordId("app-3".to_string());

    let pending = service
        .transition_status(&id, ApplicationStatus::Pending)
        .expect("needs_more_info returns to pending");
    assert_eq!(pending.status, ApplicationStatus::Pending);

    assert!(matches!(
        service.transition_status(&id, ApplicationStatus::Approved),
        Err(ListingError::Transition(_))
    ));

    service
        .transition_status(&id, ApplicationStatus::UnderReview)
        .expect("pending enters review");
    let approved = service
        .transition_status(&id, ApplicationStatus::Approved)
        .expect("review approves");
    assert_eq!(approved.status, ApplicationStatus::Approved);
}

#[tokio::test]
async fn http_listing_and_patch_round_out_the_admin_flow() {
    let (status, payload) = call(
        Request::get("/api/v1/admin/applications?owner=citizen-2&status=under_review")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["total_items"], 2);
    assert_eq!(payload["page_size"], 3);

    let (status, payload) = call(
        Request::patch("/api/v1/admin/applications/app-4/status")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"status":"pending"}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(payload["error"], "cannot move from 'approved' to 'pending'");
}
