pub mod logic;
pub mod mapping;
pub mod reader;

pub use logic::{ImportLogic, ImportOptions, ImportSummary};

use crate::errors::{AppError, AppResult};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Xlsx,
}

impl ImportFormat {
    /// Guess the format from the file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "xlsx" | "xlsm" => Ok(ImportFormat::Xlsx),
            other => Err(AppError::Spreadsheet(format!(
                "unsupported import file type '{other}' (use .csv or .xlsx)"
            ))),
        }
    }
}
