//! Terminal Gantt chart on top of the timeline layout engine.

use crate::core::calculator::expiry::project_expiry;
use crate::core::calculator::timeline::{Bar, TimelineWindow, build_bars, compute_window};
use crate::models::project::Project;
use crate::models::urgency::Urgency;
use crate::utils::colors::{GREY, RED, RESET, YELLOW, color_for_urgency};
use crate::utils::date::day_str;
use crate::utils::formatting::{days_label, pad_right, percent, truncate};
use chrono::{DateTime, Utc};

const LABEL_WIDTH: usize = 24;
const MIN_CHART_WIDTH: usize = 10;

/// Column offset and length of a bar on a chart `width` cells wide.
/// Always at least one cell, never past the right edge.
pub fn bar_cells(bar: &Bar, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let start = ((bar.left / 100.0) * width as f64).round() as usize;
    let start = start.min(width - 1);

    let len = ((bar.width / 100.0) * width as f64).round() as usize;
    let len = len.max(1).min(width - start);

    (start, len)
}

fn axis_line(window: &TimelineWindow, width: usize) -> String {
    let left = day_str(&window.start);
    let right = day_str(&window.end);
    let gap = (width + 2).saturating_sub(left.len() + right.len());
    format!(
        "{}{GREY}{}{}{}{RESET}",
        " ".repeat(LABEL_WIDTH + 1),
        left,
        " ".repeat(gap),
        right
    )
}

pub fn render_gantt(projects: &[Project], now: DateTime<Utc>, width: usize) -> String {
    let width = width.max(MIN_CHART_WIDTH);
    let window = compute_window(projects, now);

    let mut out = String::new();

    if window.degenerate {
        out.push_str("No projects to display.\n");
        return out;
    }

    out.push_str(&format!(
        "📅 Timeline {} → {}\n\n",
        day_str(&window.start),
        day_str(&window.end)
    ));
    out.push_str(&axis_line(&window, width));
    out.push('\n');

    let bars = build_bars(projects, &window);

    for (p, bar) in projects.iter().zip(bars.iter()) {
        let expiry = project_expiry(p, now);
        let color = color_for_urgency(expiry.urgency);
        let (start, len) = bar_cells(bar, width);

        let mut track = String::new();
        track.push_str(GREY);
        track.push_str(&"·".repeat(start));
        track.push_str(RESET);
        track.push_str(color);
        track.push_str(&"█".repeat(len));
        track.push_str(RESET);
        track.push_str(GREY);
        track.push_str(&"·".repeat(width - start - len));
        track.push_str(RESET);

        let label = pad_right(&truncate(&p.project_name, LABEL_WIDTH), LABEL_WIDTH);

        let note = match expiry.urgency {
            Urgency::Expiring => format!(
                "  {YELLOW}⚠ expiring {}{RESET}",
                days_label(expiry.days_left)
            ),
            Urgency::Overdue => format!(
                "  {RED}✖ overdue since {}{RESET}",
                p.end_str()
            ),
            Urgency::Normal => String::new(),
        };

        out.push_str(&format!(
            "{label} │{track}│ {:>6}{note}\n",
            percent(p.progress)
        ));

        out.push_str(&format!(
            "{} {GREY}{}{RESET}\n",
            " ".repeat(LABEL_WIDTH),
            truncate(
                &format!("{} · {} → {}", p.client_name, p.start_str(), p.end_str()),
                width + 2
            )
        ));
    }

    out
}
