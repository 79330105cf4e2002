use crate::import::reader::{Cell, RawRow};
use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use crate::utils::date::parse_datetime;
use crate::utils::excel_date::excel_serial_to_datetime;
use chrono::{DateTime, Datelike, Duration, Utc};
use std::ops::RangeInclusive;

/// Default length of a project whose end date is missing.
pub const DEFAULT_PROJECT_DAYS: i64 = 30;

/// Years a text date may fall in; the range of Excel itself.
pub const IMPORT_YEARS: RangeInclusive<i32> = 1900..=9999;

/// A field that was missing or unreadable and fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefault {
    /// 1-based data row.
    pub row: usize,
    pub field: &'static str,
    pub raw: String,
}

#[derive(Debug, Clone, Default)]
pub struct Mapped {
    pub projects: Vec<Project>,
    /// Only values that were present but unreadable are listed here.
    pub defaulted: Vec<FieldDefault>,
}

/// Lowercase alphanumerics only: "Project Name", "project_name" and
/// "PROJECT-NAME" all become "projectname".
fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

struct RowView<'a> {
    cells: Vec<(String, &'a Cell)>,
}

impl<'a> RowView<'a> {
    fn new(row: &'a RawRow) -> Self {
        Self {
            cells: row.iter().map(|(k, v)| (normalize_header(k), v)).collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Cell> {
        self.cells
            .iter()
            .find(|(k, c)| k == key && !matches!(c, Cell::Empty))
            .map(|(_, c)| *c)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Cell::as_text)
    }
}

fn cell_datetime(cell: &Cell) -> Option<DateTime<Utc>> {
    match cell {
        Cell::Number(serial) => excel_serial_to_datetime(*serial),
        Cell::Text(s) => match parse_datetime(s) {
            Some(dt) if IMPORT_YEARS.contains(&dt.year()) => Some(dt),
            Some(_) => None,
            None => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(excel_serial_to_datetime),
        },
        Cell::Empty => None,
    }
}

fn cell_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Map raw spreadsheet rows to projects, defaulting every missing or
/// malformed field. Never fails.
pub fn map_rows(rows: &[RawRow], now: DateTime<Utc>) -> Mapped {
    let stamp = now.timestamp_millis();
    let mut out = Mapped::default();

    for (index, row) in rows.iter().enumerate() {
        let view = RowView::new(row);
        let row_no = index + 1;

        let mut note = |field: &'static str, cell: &Cell| {
            out.defaulted.push(FieldDefault {
                row: row_no,
                field,
                raw: cell.as_text().unwrap_or_default(),
            });
        };

        let start_date = match view.get("startdate") {
            Some(cell) => cell_datetime(cell).unwrap_or_else(|| {
                note("Start Date", cell);
                now
            }),
            None => now,
        };

        let default_end = now
            .checked_add_signed(Duration::days(DEFAULT_PROJECT_DAYS))
            .unwrap_or(now);
        let end_date = match view.get("enddate") {
            Some(cell) => cell_datetime(cell).unwrap_or_else(|| {
                note("End Date", cell);
                default_end
            }),
            None => default_end,
        };

        let status = match view.get("status") {
            Some(cell) => cell
                .as_text()
                .and_then(|s| ProjectStatus::parse_loose(&s))
                .unwrap_or_else(|| {
                    note("Status", cell);
                    ProjectStatus::Pending
                }),
            None => ProjectStatus::Pending,
        };

        let progress = match view.get("progress") {
            Some(cell) => cell_number(cell).unwrap_or_else(|| {
                note("Progress", cell);
                0.0
            }),
            None => 0.0,
        };

        out.projects.push(Project {
            id: format!("prj-{index}-{stamp}"),
            project_name: view
                .text("projectname")
                .unwrap_or_else(|| format!("Project {row_no}")),
            client_name: view
                .text("clientname")
                .unwrap_or_else(|| "Unknown Client".to_string()),
            client_email: view.text("clientemail").unwrap_or_default(),
            client_phone: view.text("clientphone").unwrap_or_default(),
            start_date,
            end_date,
            manager_email: view.text("manageremail").unwrap_or_default(),
            status,
            progress,
        });
    }

    out
}
