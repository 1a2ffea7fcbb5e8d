use crate::records::{
    transition, AccountStatus, ApplicationStatus, ComplaintStatus, StatusWorkflow,
};

#[test]
fn complaint_workflow_follows_review_path() {
    assert_eq!(
        transition(ComplaintStatus::Pending, ComplaintStatus::InReview),
        Ok(ComplaintStatus::InReview)
    );
    assert!(ComplaintStatus::InReview.can_transition_to(ComplaintStatus::Resolved));
    assert!(ComplaintStatus::InReview.can_transition_to(ComplaintStatus::Rejected));
    assert!(ComplaintStatus::Rejected.can_transition_to(ComplaintStatus::Pending));
    assert!(ComplaintStatus::Resolved.is_terminal());

    let err = transition(ComplaintStatus::Pending, ComplaintStatus::Resolved)
        .expect_err("review cannot be skipped");
    assert_eq!(err.to_string(), "cannot move from 'pending' to 'resolved'");
}

#[test]
fn application_workflow_allows_resubmission() {
    assert!(ApplicationStatus::UnderReview.can_transition_to(ApplicationStatus::NeedsMoreInfo));
    assert!(ApplicationStatus::NeedsMoreInfo.can_transition_to(ApplicationStatus::Pending));
    assert!(ApplicationStatus::Rejected.can_transition_to(ApplicationStatus::Pending));
    assert!(!ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Approved));
    assert!(ApplicationStatus::Approved.is_terminal());
    assert_eq!(ApplicationStatus::NeedsMoreInfo.label(), "needs_more_info");
}

#[test]
fn account_workflow_reactivates_only_to_active() {
    assert!(AccountStatus::Active.can_transition_to(AccountStatus::Suspended));
    assert!(AccountStatus::Suspended.can_transition_to(AccountStatus::Active));
    assert!(AccountStatus::Suspended.can_transition_to(AccountStatus::Deactivated));
    assert!(AccountStatus::Deactivated.can_transition_to(AccountStatus::Active));
    assert!(transition(AccountStatus::Deactivated, AccountStatus::Suspended).is_err());
    assert!(!AccountStatus::Deactivated.is_terminal());
}

#[test]
fn same_status_is_always_accepted() {
    assert_eq!(
        transition(ComplaintStatus::Resolved, ComplaintStatus::Resolved),
        Ok(ComplaintStatus::Resolved)
    );
    assert_eq!(
        transition(ApplicationStatus::Approved, ApplicationStatus::Approved),
        Ok(ApplicationStatus::Approved)
    );
}
