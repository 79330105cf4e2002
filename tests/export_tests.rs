mod common;
use common::{NOW, init_with_sample, pf, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_projects_csv() {
    let db_path = init_with_sample("export_projects_csv");
    let out = temp_out("export_projects_csv", "csv");

    pf().args([
        "--db", &db_path, "--now", NOW, "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let header = content.lines().next().unwrap_or_default();
    assert!(header.starts_with("id,project_name,client_name"));
    assert!(header.ends_with("days_left,urgency"));
    assert!(content.contains("Website Redesign"));
    assert!(content.contains("2025-06-11"));
    assert!(content.contains(",10,expiring"));
    assert!(content.contains(",-5,overdue"));
}

#[test]
fn test_export_projects_json() {
    let db_path = init_with_sample("export_projects_json");
    let out = temp_out("export_projects_json", "json");

    pf().args([
        "--db", &db_path, "--now", NOW, "export", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["project_name"], "Website Redesign");
    assert_eq!(rows[0]["status"], "On Track");
    assert_eq!(rows[2]["urgency"], "overdue");
}

#[test]
fn test_export_projects_xlsx() {
    let db_path = init_with_sample("export_projects_xlsx");
    let out = temp_out("export_projects_xlsx", "xlsx");

    pf().args([
        "--db", &db_path, "--now", NOW, "export", "--format", "xlsx", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).expect("read xlsx");
    // xlsx is a zip archive
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_calls_csv() {
    let db_path = init_with_sample("export_calls_csv");
    let out = temp_out("export_calls_csv", "csv");

    pf().args([
        "--db",
        &db_path,
        "--now",
        NOW,
        "call",
        "--project",
        "prj-0-1748768400000",
        "--duration",
        "90",
    ])
    .assert()
    .success();

    pf().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--calls",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,project_id,client_name"));
    assert!(content.contains("Acme Corp"));
    assert!(content.contains(",90,"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = init_with_sample("export_relative");

    pf().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "csv",
        "--file",
        "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_asks_before_overwrite() {
    let db_path = init_with_sample("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    pf().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    pf().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Mobile App"));
}

#[test]
fn test_export_empty_call_log_writes_nothing() {
    let db_path = init_with_sample("export_no_calls");
    let out = temp_out("export_no_calls", "json");

    pf().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--calls",
    ])
    .assert()
    .success()
    .stdout(contains("No calls found"));

    assert!(!std::path::Path::new(&out).exists());
}
