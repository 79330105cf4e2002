use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_calls, load_projects};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{CallExport, ExportRecord, ProjectExport};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::{DateTime, Utc};
use std::path::Path;

/// High-level export of projects or call logs.
pub struct ExportLogic;

impl ExportLogic {
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path
    /// - `calls`: export the call log instead of the projects
    /// - `now`: reference time for the days-left / urgency columns
    ///
    /// Returns the number of exported records.
    pub fn export(
        pool: &DbPool,
        format: &ExportFormat,
        file: &str,
        calls: bool,
        force: bool,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        if calls {
            let records: Vec<CallExport> =
                load_calls(&pool.conn)?.iter().map(CallExport::from).collect();
            let n = write_records(*format, &records, "Calls", "calls", path)?;
            log_export(pool, *format, "call log entr(ies)", n, file);
            Ok(n)
        } else {
            let records: Vec<ProjectExport> = load_projects(&pool.conn)?
                .iter()
                .map(|p| ProjectExport::from_project(p, now))
                .collect();
            let n = write_records(*format, &records, "Projects", "projects", path)?;
            log_export(pool, *format, "project(s)", n, file);
            Ok(n)
        }
    }
}

fn log_export(pool: &DbPool, format: ExportFormat, what: &str, n: usize, file: &str) {
    if n > 0 {
        ttlog_soft(
            &pool.conn,
            "export",
            file,
            &format!("{n} {what} exported as {}", format.as_str()),
        );
    }
}

fn write_records<T: ExportRecord>(
    format: ExportFormat,
    records: &[T],
    sheet: &str,
    what: &str,
    path: &Path,
) -> AppResult<usize> {
    if records.is_empty() {
        warning(format!("No {what} found. Nothing to export."));
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(records, path)?,
        ExportFormat::Json => export_json(records, path)?,
        ExportFormat::Xlsx => export_xlsx(records, sheet, path)?,
    }

    Ok(records.len())
}
