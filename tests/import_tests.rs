mod common;
use chrono::{Duration, TimeZone, Utc};
use common::{base_time, temp_out, write_csv};
use projectflow::config::Config;
use projectflow::core::clock::FixedClock;
use projectflow::db::pool::DbPool;
use projectflow::db::queries::{load_outbox, load_projects, store_revision};
use projectflow::import::mapping::{DEFAULT_PROJECT_DAYS, map_rows};
use projectflow::import::reader::{Cell, RawRow};
use projectflow::import::{ImportFormat, ImportLogic, ImportOptions};
use projectflow::models::status::ProjectStatus;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use std::sync::Arc;

fn row(cells: &[(&str, Cell)]) -> RawRow {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

#[test]
fn empty_row_gets_every_default() {
    let now = base_time();
    let mapped = map_rows(&[RawRow::new(), RawRow::new()], now);

    assert_eq!(mapped.projects.len(), 2);
    assert!(mapped.defaulted.is_empty());

    let p = &mapped.projects[1];
    assert_eq!(p.project_name, "Project 2");
    assert_eq!(p.client_name, "Unknown Client");
    assert_eq!(p.client_email, "");
    assert_eq!(p.client_phone, "");
    assert_eq!(p.manager_email, "");
    assert_eq!(p.status, ProjectStatus::Pending);
    assert_eq!(p.progress, 0.0);
    assert_eq!(p.start_date, now);
    assert_eq!(p.end_date, now + Duration::days(DEFAULT_PROJECT_DAYS));
    assert_eq!(p.id, format!("prj-1-{}", now.timestamp_millis()));
}

#[test]
fn values_are_read_from_any_header_spelling() {
    let mapped = map_rows(
        &[row(&[
            ("Project Name", text("Website")),
            ("client_name", text("Acme")),
            ("CLIENT-EMAIL", text("ops@acme.test")),
            ("Start Date", text("2025-05-01")),
            ("End Date", Cell::Number(45839.0)),
            ("Status", text("at risk")),
            ("Progress", text("42.5%")),
        ])],
        base_time(),
    );

    let p = &mapped.projects[0];
    assert_eq!(p.project_name, "Website");
    assert_eq!(p.client_name, "Acme");
    assert_eq!(p.client_email, "ops@acme.test");
    assert_eq!(p.start_date, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
    // Excel serial 45839 = 2025-07-01
    assert_eq!(p.end_date, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    assert_eq!(p.status, ProjectStatus::AtRisk);
    assert_eq!(p.progress, 42.5);
}

#[test]
fn malformed_values_fall_back_and_are_reported() {
    let now = base_time();
    let mapped = map_rows(
        &[row(&[
            ("Start Date", text("yesterday-ish")),
            ("End Date", text("31/31/2025")),
            ("Status", text("on fire")),
            ("Progress", text("lots")),
        ])],
        now,
    );

    let p = &mapped.projects[0];
    assert_eq!(p.start_date, now);
    assert_eq!(p.end_date, now + Duration::days(DEFAULT_PROJECT_DAYS));
    assert_eq!(p.status, ProjectStatus::Pending);
    assert_eq!(p.progress, 0.0);

    let fields: Vec<_> = mapped.defaulted.iter().map(|d| d.field).collect();
    assert_eq!(fields, ["Start Date", "End Date", "Status", "Progress"]);
    assert!(mapped.defaulted.iter().all(|d| d.row == 1));
}

#[test]
fn inverted_dates_are_kept() {
    let mapped = map_rows(
        &[row(&[
            ("Start Date", text("2025-08-01")),
            ("End Date", text("2025-07-01")),
        ])],
        base_time(),
    );
    assert!(mapped.projects[0].is_inverted());
}

#[test]
fn import_format_follows_extension() {
    assert_eq!(
        ImportFormat::from_path(Path::new("/tmp/a.CSV")).unwrap(),
        ImportFormat::Csv
    );
    assert_eq!(
        ImportFormat::from_path(Path::new("/tmp/a.xlsx")).unwrap(),
        ImportFormat::Xlsx
    );
    assert!(ImportFormat::from_path(Path::new("/tmp/a.ods")).is_err());
}

#[test]
fn import_appends_saves_and_alerts_once() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let cfg = Config::default();
    let clock = Arc::new(FixedClock::new(base_time()));

    let csv = write_csv(
        "import_appends_saves_and_alerts_once",
        "Project Name,End Date,Manager Email\n\
         Soon,2025-06-05,lead@flow.test\n\
         Later,2025-12-01,\n",
    );

    let summary = ImportLogic::import(
        &mut pool,
        &cfg,
        &csv,
        ImportOptions::default(),
        clock.clone(),
    )
    .expect("first import");
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.revision, 1);
    let pass = summary.pass.expect("alert pass ran");
    assert_eq!(pass.sent.len(), 1);
    assert_eq!(pass.sent[0].recipient, "lead@flow.test");

    // same file again, same instant: ids must stay unique
    let summary =
        ImportLogic::import(&mut pool, &cfg, &csv, ImportOptions::default(), clock)
            .expect("second import");
    assert_eq!(summary.total, 4);
    assert_eq!(store_revision(&pool.conn).unwrap(), 2);

    let projects = load_projects(&pool.conn).unwrap();
    let mut ids: Vec<_> = projects.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(projects[0].project_name, "Soon");
    assert_eq!(projects[3].project_name, "Later");

    // each import is its own session: the second pass alerts both "Soon" rows
    let outbox = load_outbox(&pool.conn).unwrap();
    assert_eq!(outbox.len(), 3);
    assert!(outbox.iter().all(|(to, _)| to == "lead@flow.test"));
}

#[test]
fn replace_import_drops_previous_projects() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let cfg = Config::default();
    let clock = Arc::new(FixedClock::new(base_time()));

    let first = write_csv("replace_import_first", "Project Name\nOld\n");
    let second = write_csv("replace_import_second", "Project Name\nNew A\nNew B\n");

    let opts = ImportOptions {
        replace: false,
        alerts: false,
    };
    ImportLogic::import(&mut pool, &cfg, &first, opts, clock.clone()).unwrap();

    let opts = ImportOptions {
        replace: true,
        alerts: false,
    };
    let summary = ImportLogic::import(&mut pool, &cfg, &second, opts, clock).unwrap();
    assert!(summary.pass.is_none());
    assert_eq!(summary.total, 2);

    let names: Vec<_> = load_projects(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|p| p.project_name)
        .collect();
    assert_eq!(names, ["New A", "New B"]);
}

#[test]
fn missing_import_file_is_an_error() {
    assert!(ImportLogic::read_rows("/definitely/not/here.csv").is_err());
}

#[test]
fn xlsx_first_sheet_is_read_and_mapped() {
    let path = temp_out("xlsx_first_sheet_is_read_and_mapped", "xlsx");

    let mut workbook = Workbook::new();
    let date_fmt = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Project Name", "Client Name", "Start Date", "End Date", "Progress"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    // Row 1: serial date cell + text date
    sheet.write_string(1, 0, "Portal").unwrap();
    sheet.write_string(1, 1, "Acme").unwrap();
    sheet.write_number_with_format(1, 2, 45839.0, &date_fmt).unwrap();
    sheet.write_string(1, 3, "2025-08-15").unwrap();
    sheet.write_number(1, 4, 55.0).unwrap();
    // Row 2 left empty
    // Row 3: day-first text date, no end date
    sheet.write_string(3, 0, "Billing").unwrap();
    sheet.write_string(3, 2, "01/07/2025").unwrap();
    workbook.save(&path).unwrap();

    let rows = ImportLogic::read_rows(&path).expect("xlsx rows");
    assert_eq!(rows.len(), 2);

    let now = base_time();
    let mapped = map_rows(&rows, now);
    assert!(mapped.defaulted.is_empty());

    let portal = &mapped.projects[0];
    assert_eq!(portal.project_name, "Portal");
    assert_eq!(portal.client_name, "Acme");
    assert_eq!(portal.start_date, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    assert_eq!(portal.end_date, Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap());
    assert_eq!(portal.progress, 55.0);

    let billing = &mapped.projects[1];
    assert_eq!(billing.project_name, "Billing");
    assert_eq!(billing.client_name, "Unknown Client");
    assert_eq!(billing.start_date, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    assert_eq!(billing.end_date, now + Duration::days(DEFAULT_PROJECT_DAYS));
}
