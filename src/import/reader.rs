use crate::errors::{AppError, AppResult};
use calamine::{DataType, Reader, Xlsx, open_workbook};
use std::collections::HashMap;
use std::path::Path;

/// One spreadsheet cell, reduced to what the mapping needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Trimmed text, or `None` for empty / whitespace-only cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Cell::Number(n) => Some(format!("{n}")),
            _ => None,
        }
    }
}

/// Header → cell map for one data row.
pub type RawRow = HashMap<String, Cell>;

/// Read every data row of a CSV file (first line = headers).
pub(crate) fn read_csv(path: &Path) -> AppResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = match record.get(i) {
                Some(v) if !v.is_empty() => Cell::Text(v.to_string()),
                _ => Cell::Empty,
            };
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Read every data row of the first worksheet of an XLSX file.
pub(crate) fn read_xlsx(path: &Path) -> AppResult<Vec<RawRow>> {
    let mut workbook = open_workbook::<Xlsx<_>, _>(path)
        .map_err(|e: calamine::XlsxError| AppError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Spreadsheet("no sheets found in workbook".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| AppError::Spreadsheet(format!("cannot read sheet '{sheet_name}'")))?
        .map_err(|e| AppError::Spreadsheet(e.to_string()))?;

    let mut iter = range.rows();

    let headers: Vec<String> = match iter.next() {
        Some(first) => first
            .iter()
            .map(|c| to_cell(c).as_text().unwrap_or_default())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for data in iter {
        if data.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }

        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let cell = data.get(i).map(to_cell).unwrap_or(Cell::Empty);
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn to_cell(c: &DataType) -> Cell {
    match c {
        DataType::String(s) if s.trim().is_empty() => Cell::Empty,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::DateTime(serial) => Cell::Number(*serial),
        DataType::DateTimeIso(s) => Cell::Text(s.clone()),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        _ => Cell::Empty,
    }
}
