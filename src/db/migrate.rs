use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Every other migration is recorded in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id             TEXT PRIMARY KEY,
        position       INTEGER NOT NULL,
        project_name   TEXT NOT NULL,
        client_name    TEXT NOT NULL DEFAULT '',
        client_email   TEXT NOT NULL DEFAULT '',
        client_phone   TEXT NOT NULL DEFAULT '',
        start_date     TEXT NOT NULL,
        end_date       TEXT NOT NULL,
        manager_email  TEXT NOT NULL DEFAULT '',
        status         TEXT NOT NULL DEFAULT 'Pending'
                       CHECK(status IN ('On Track','At Risk','Completed','Pending')),
        progress       REAL NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_projects_position ON projects(position);

    CREATE TABLE IF NOT EXISTS store_meta (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    );

    INSERT OR IGNORE INTO store_meta (key, value) VALUES ('revision', '0');
"#;

const CREATE_CALL_LOGS: &str = r#"
    CREATE TABLE IF NOT EXISTS call_logs (
        id                TEXT PRIMARY KEY,
        project_id        TEXT NOT NULL,
        client_name       TEXT NOT NULL,
        client_phone      TEXT NOT NULL DEFAULT '',
        caller_name       TEXT NOT NULL,
        start_time        TEXT NOT NULL,
        end_time          TEXT NOT NULL,
        duration_seconds  INTEGER NOT NULL,
        notes             TEXT NOT NULL DEFAULT '',
        created_at        TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_call_logs_start ON call_logs(start_time);
"#;

const CREATE_EMAIL_TEMPLATES: &str = r#"
    CREATE TABLE IF NOT EXISTS email_templates (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        subject     TEXT NOT NULL,
        body        TEXT NOT NULL,
        is_custom   INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL
    );

    INSERT OR IGNORE INTO email_templates (id, name, subject, body, is_custom, created_at) VALUES
        ('t1', 'Project Update', 'Weekly Project Update',
         'Dear Client, Here is the latest progress on your project...', 0, datetime('now')),
        ('t2', 'Invoice Due', 'Invoice Payment Reminder',
         'Dear Client, This is a friendly reminder regarding the invoice...', 0, datetime('now')),
        ('t3', 'Completion', 'Project Completion Notice',
         'We are happy to announce that your project has been completed!', 0, datetime('now')),
        ('t4', 'Meeting Request', 'Request for Sync Meeting',
         'Would you be available for a quick sync later this week?', 0, datetime('now'));
"#;

const CREATE_OUTBOX: &str = r#"
    CREATE TABLE IF NOT EXISTS outbox (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        sent_at    TEXT NOT NULL,
        sender     TEXT NOT NULL,
        recipient  TEXT NOT NULL,
        subject    TEXT NOT NULL,
        body       TEXT NOT NULL
    );
"#;

/// Ordered list of schema migrations: (version, description, SQL).
const MIGRATIONS: [(&str, &str, &str); 4] = [
    (
        "20250301_0001_create_projects",
        "Created projects and store_meta tables",
        CREATE_PROJECTS,
    ),
    (
        "20250301_0002_create_call_logs",
        "Created call_logs table",
        CREATE_CALL_LOGS,
    ),
    (
        "20250301_0003_create_email_templates",
        "Created email_templates table with default templates",
        CREATE_EMAIL_TEMPLATES,
    ),
    (
        "20250301_0004_create_outbox",
        "Created outbox table",
        CREATE_OUTBOX,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(conn: &Connection, version: &str, message: &str, sql: &str) -> Result<bool> {
    // 1) Already applied?
    if is_applied(conn, version)? {
        return Ok(false);
    }

    // 2) Run it and mark it as applied atomically
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tx.commit()?;

    Ok(true)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by every command that opens the database.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, message, sql) in MIGRATIONS.iter() {
        if apply_migration(conn, version, message, sql)? {
            success(format!("Migration applied: {version}"));
            applied += 1;
        }
    }

    Ok(applied)
}

/// Versions of every migration recorded in the log.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}
