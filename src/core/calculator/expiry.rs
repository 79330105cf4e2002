//! Days-remaining and urgency classification for a single project.

use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use crate::models::urgency::Urgency;
use chrono::{DateTime, Utc};

/// Upper bound (inclusive) of the "expiring" band, in days.
pub const EXPIRY_WINDOW_DAYS: i64 = 15;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calendar-day rounding: ceiling of `(end - now)` expressed in days.
///
/// A deadline 12 hours away counts as 1 day, exactly "now" is 0,
/// 12 hours ago is 0 and 24 hours ago is -1.
pub fn days_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (end - now).num_milliseconds();
    let q = ms / MILLIS_PER_DAY;
    if ms % MILLIS_PER_DAY > 0 { q + 1 } else { q }
}

/// Tri-state urgency for a deadline and status.
pub fn classify(end: DateTime<Utc>, now: DateTime<Utc>, status: ProjectStatus) -> Urgency {
    urgency_for_days(days_remaining(end, now), status)
}

pub fn urgency_for_days(days: i64, status: ProjectStatus) -> Urgency {
    if days < 0 && !status.is_completed() {
        Urgency::Overdue
    } else if days > 0 && days <= EXPIRY_WINDOW_DAYS {
        Urgency::Expiring
    } else {
        Urgency::Normal
    }
}

/// Days remaining and urgency of a project, as shown next to it in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub days_left: i64,
    pub urgency: Urgency,
}

pub fn project_expiry(project: &Project, now: DateTime<Utc>) -> Expiry {
    let days_left = days_remaining(project.end_date, now);
    Expiry {
        days_left,
        urgency: urgency_for_days(days_left, project.status),
    }
}
