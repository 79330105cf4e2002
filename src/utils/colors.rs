/// ANSI color helper utilities for terminal output.
use crate::models::status::ProjectStatus;
use crate::models::urgency::Urgency;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Bar / badge colour:
/// overdue → red, expiring → yellow, otherwise blue
pub fn color_for_urgency(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Overdue => RED,
        Urgency::Expiring => YELLOW,
        Urgency::Normal => BLUE,
    }
}

pub fn color_for_status(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Completed => GREEN,
        ProjectStatus::AtRisk => RED,
        ProjectStatus::OnTrack => BLUE,
        ProjectStatus::Pending => GREY,
    }
}

/// Days-left colour: negative → red, 1..=15 → yellow, otherwise reset
pub fn color_for_days_left(days: i64, urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Overdue => RED,
        Urgency::Expiring => YELLOW,
        Urgency::Normal if days < 0 => GREY,
        Urgency::Normal => RESET,
    }
}

