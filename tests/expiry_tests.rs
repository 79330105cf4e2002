mod common;
use chrono::Duration;
use common::{base_time, project};
use projectflow::core::calculator::expiry::{
    EXPIRY_WINDOW_DAYS, classify, days_remaining, project_expiry,
};
use projectflow::models::status::ProjectStatus;
use projectflow::models::urgency::Urgency;

#[test]
fn days_remaining_rounds_up_partial_days() {
    let now = base_time();

    assert_eq!(days_remaining(now + Duration::hours(12), now), 1);
    assert_eq!(days_remaining(now, now), 0);
    assert_eq!(days_remaining(now - Duration::hours(12), now), 0);
    assert_eq!(days_remaining(now - Duration::hours(24), now), -1);
    assert_eq!(days_remaining(now - Duration::hours(36), now), -1);
    assert_eq!(days_remaining(now + Duration::days(3), now), 3);
    assert_eq!(
        days_remaining(now + Duration::days(3) + Duration::milliseconds(1), now),
        4
    );
}

#[test]
fn classify_boundaries() {
    let now = base_time();
    let at = |days: i64| now + Duration::days(days);
    let pending = ProjectStatus::Pending;

    assert_eq!(classify(at(0), now, pending), Urgency::Normal);
    assert_eq!(classify(at(1), now, pending), Urgency::Expiring);
    assert_eq!(classify(at(15), now, pending), Urgency::Expiring);
    assert_eq!(classify(at(16), now, pending), Urgency::Normal);
    assert_eq!(classify(at(-1), now, pending), Urgency::Overdue);
    assert_eq!(
        classify(now + Duration::hours(12), now, pending),
        Urgency::Expiring
    );
    assert_eq!(EXPIRY_WINDOW_DAYS, 15);
}

#[test]
fn completed_projects_are_never_overdue() {
    let now = base_time();
    let past = now - Duration::days(10);

    assert_eq!(classify(past, now, ProjectStatus::Completed), Urgency::Normal);
    assert_eq!(classify(past, now, ProjectStatus::AtRisk), Urgency::Overdue);
    assert_eq!(classify(past, now, ProjectStatus::OnTrack), Urgency::Overdue);
}

#[test]
fn expiring_ignores_status() {
    let now = base_time();
    let soon = now + Duration::days(5);

    for status in ProjectStatus::ALL {
        assert_eq!(classify(soon, now, status), Urgency::Expiring, "{status}");
    }
}

#[test]
fn project_expiry_reports_days_and_urgency() {
    let p = project("a", -10, 7);
    let e = project_expiry(&p, base_time());

    assert_eq!(e.days_left, 7);
    assert_eq!(e.urgency, Urgency::Expiring);
}
