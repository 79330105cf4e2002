use crate::models::project::Project;
use chrono::{DateTime, Duration, Utc};

/// Padding added before the earliest start and after the latest end.
pub const TIMELINE_BUFFER_DAYS: i64 = 5;

/// Minimum width of a bar, in percent of the window.
pub const MIN_SPAN_PERCENT: f64 = 1.0;

/// Shared time axis for every project bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// No projects: zero span, every position query returns 0.
    pub degenerate: bool,
}

impl TimelineWindow {
    pub fn total_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }
}

/// Bar geometry of one project, in percent of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub project_id: String,
    pub left: f64,
    pub width: f64,
}

pub fn compute_window(projects: &[Project], now: DateTime<Utc>) -> TimelineWindow {
    // -----------------------------
    // Empty store → degenerate window anchored at now
    // -----------------------------
    let (Some(min_start), Some(max_end)) = (
        projects.iter().map(|p| p.start_date).min(),
        projects.iter().map(|p| p.end_date).max(),
    ) else {
        return TimelineWindow {
            start: now,
            end: now,
            degenerate: true,
        };
    };

    // Dates near the representable limits saturate instead of overflowing.
    let buffer = Duration::days(TIMELINE_BUFFER_DAYS);
    let start = min_start
        .checked_sub_signed(buffer)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut end = max_end
        .checked_add_signed(buffer)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    // An inverted project can put every end before every start; keep end > start.
    if end <= start {
        end = start
            .checked_add_signed(buffer + buffer)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    TimelineWindow {
        start,
        end,
        degenerate: false,
    }
}

/// Where `date` falls on the window, clamped to [0, 100].
pub fn position(date: DateTime<Utc>, window: &TimelineWindow) -> f64 {
    let total = window.total_millis();
    if window.degenerate || total <= 0 {
        return 0.0;
    }

    let offset = (date - window.start).num_milliseconds() as f64;
    let percent = offset / total as f64 * 100.0;
    percent.clamp(0.0, 100.0)
}

/// Width between two dates, never below `MIN_SPAN_PERCENT`.
/// Inverted ranges use the magnitude of the difference.
pub fn span(start: DateTime<Utc>, end: DateTime<Utc>, window: &TimelineWindow) -> f64 {
    let s = position(start, window);
    let e = position(end, window);
    (e - s).abs().max(MIN_SPAN_PERCENT)
}

pub fn build_bars(projects: &[Project], window: &TimelineWindow) -> Vec<Bar> {
    projects
        .iter()
        .map(|p| Bar {
            project_id: p.id.clone(),
            left: position(p.start_date.min(p.end_date), window),
            width: span(p.start_date, p.end_date, window),
        })
        .collect()
}
