#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, TimeZone, Utc};
use projectflow::models::project::Project;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Fixed "now" handed to the binary with `--now`.
pub const NOW: &str = "2025-06-01T09:00:00Z";

pub fn pf() -> Command {
    cargo_bin_cmd!("projectflow")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_projectflow.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `contents` to a temp CSV and return its path.
pub fn write_csv(name: &str, contents: &str) -> String {
    let p = temp_out(name, "csv");
    fs::write(&p, contents).expect("write csv fixture");
    p
}

/// Relative to NOW (2025-06-01):
/// - Website Redesign ends in 10 days (expiring)
/// - Mobile App ends in 60 days (normal)
/// - Data Migration ended 5 days ago (overdue)
/// - Archive Cleanup ended 3 days ago but is completed (normal)
pub const SAMPLE_CSV: &str = "\
Project Name,Client Name,Client Email,Client Phone,Start Date,End Date,Manager Email,Status,Progress
Website Redesign,Acme Corp,ops@acme.test,+1 555 0100,2025-05-01,2025-06-11,lead@flow.test,On Track,40
Mobile App,Globex,it@globex.test,+1 555 0101,2025-05-15,2025-07-31,,At Risk,15
Data Migration,Initech,dev@initech.test,,2025-04-01,2025-05-27,pm@flow.test,Pending,80
Archive Cleanup,Acme Corp,,,2025-04-10,2025-05-29,,Completed,100
";

/// Init a DB (test mode) and import `SAMPLE_CSV` without alerts.
pub fn init_with_sample(name: &str) -> String {
    let db_path = setup_test_db(name);

    pf().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_csv(name, SAMPLE_CSV);
    pf().args([
        "--db",
        &db_path,
        "--test",
        "--now",
        NOW,
        "import",
        &csv,
        "--no-alerts",
    ])
    .assert()
    .success();

    db_path
}

// ---------------------------
// Library helpers
// ---------------------------

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn day(n: i64) -> DateTime<Utc> {
    base_time() + Duration::days(n)
}

/// Project running from `start` to `end` days after `base_time()`.
pub fn project(id: &str, start: i64, end: i64) -> Project {
    Project::new(id, format!("Project {id}"), day(start), day(end))
}
