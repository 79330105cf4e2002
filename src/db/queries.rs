use crate::core::store::ProjectStore;
use crate::errors::{AppError, AppResult};
use crate::models::communication::{CallLogEntry, EmailPayload, EmailTemplate};
use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_ts(row: &Row, col: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

// ---------------------------
// Projects
// ---------------------------

pub fn map_project_row(row: &Row) -> Result<Project> {
    let status_str: String = row.get("status")?;
    let status = ProjectStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidStatus(status_str.clone())))?;

    Ok(Project {
        id: row.get("id")?,
        project_name: row.get("project_name")?,
        client_name: row.get("client_name")?,
        client_email: row.get("client_email")?,
        client_phone: row.get("client_phone")?,
        start_date: parse_ts(row, "start_date")?,
        end_date: parse_ts(row, "end_date")?,
        manager_email: row.get("manager_email")?,
        status,
        progress: row.get("progress")?,
    })
}

pub fn load_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT * FROM projects ORDER BY position ASC")?;
    let rows = stmt.query_map([], map_project_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn store_revision(conn: &Connection) -> AppResult<u64> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM store_meta WHERE key = 'revision'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0))
}

pub fn load_store(conn: &Connection) -> AppResult<ProjectStore> {
    let projects = load_projects(conn)?;
    let revision = store_revision(conn)?;
    Ok(ProjectStore::from_parts(projects, revision))
}

/// Persist the whole project set and its revision in one transaction.
pub fn save_store(conn: &Connection, store: &ProjectStore) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute("DELETE FROM projects", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO projects (id, position, project_name, client_name, client_email,
                                   client_phone, start_date, end_date, manager_email, status, progress)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;

        for (pos, p) in store.projects().iter().enumerate() {
            stmt.execute(params![
                p.id,
                pos as i64,
                p.project_name,
                p.client_name,
                p.client_email,
                p.client_phone,
                p.start_date.to_rfc3339(),
                p.end_date.to_rfc3339(),
                p.manager_email,
                p.status.to_db_str(),
                p.progress,
            ])?;
        }
    }

    tx.execute(
        "INSERT INTO store_meta (key, value) VALUES ('revision', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [store.revision().to_string()],
    )?;

    tx.commit()?;
    Ok(())
}

pub fn find_project(conn: &Connection, id: &str) -> AppResult<Project> {
    conn.query_row(
        "SELECT * FROM projects WHERE id = ?1",
        [id],
        map_project_row,
    )
    .optional()?
    .ok_or_else(|| AppError::ProjectNotFound(id.to_string()))
}

// ---------------------------
// Outbox
// ---------------------------

pub fn insert_outbox(
    conn: &Connection,
    sender: &str,
    payload: &EmailPayload,
    sent_at: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO outbox (sent_at, sender, recipient, subject, body)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![sent_at, sender, payload.to, payload.subject, payload.body],
    )?;
    Ok(())
}

/// (recipient, subject) of every stored message, oldest first.
pub fn load_outbox(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT recipient, subject FROM outbox ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Email templates
// ---------------------------

fn map_template_row(row: &Row) -> Result<EmailTemplate> {
    Ok(EmailTemplate {
        id: row.get("id")?,
        name: row.get("name")?,
        subject: row.get("subject")?,
        body: row.get("body")?,
        is_custom: row.get::<_, i32>("is_custom")? == 1,
    })
}

pub fn load_templates(conn: &Connection) -> AppResult<Vec<EmailTemplate>> {
    let mut stmt =
        conn.prepare("SELECT * FROM email_templates ORDER BY is_custom ASC, created_at ASC, id ASC")?;
    let rows = stmt.query_map([], map_template_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_template(conn: &Connection, id: &str) -> AppResult<EmailTemplate> {
    conn.query_row(
        "SELECT * FROM email_templates WHERE id = ?1",
        [id],
        map_template_row,
    )
    .optional()?
    .ok_or_else(|| AppError::TemplateNotFound(id.to_string()))
}

pub fn insert_template(conn: &Connection, t: &EmailTemplate, created_at: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO email_templates (id, name, subject, body, is_custom, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.id,
            t.name,
            t.subject,
            t.body,
            if t.is_custom { 1 } else { 0 },
            created_at
        ],
    )?;
    Ok(())
}

pub fn delete_template(conn: &Connection, id: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM email_templates WHERE id = ?1", [id])?;
    Ok(n > 0)
}

// ---------------------------
// Call logs
// ---------------------------

fn map_call_row(row: &Row) -> Result<CallLogEntry> {
    Ok(CallLogEntry {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        client_name: row.get("client_name")?,
        client_phone: row.get("client_phone")?,
        caller_name: row.get("caller_name")?,
        start_time: parse_ts(row, "start_time")?,
        end_time: parse_ts(row, "end_time")?,
        duration_seconds: row.get("duration_seconds")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_call(conn: &Connection, c: &CallLogEntry, created_at: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO call_logs (id, project_id, client_name, client_phone, caller_name,
                                start_time, end_time, duration_seconds, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            c.id,
            c.project_id,
            c.client_name,
            c.client_phone,
            c.caller_name,
            c.start_time.to_rfc3339(),
            c.end_time.to_rfc3339(),
            c.duration_seconds,
            c.notes,
            created_at,
        ],
    )?;
    Ok(())
}

/// Newest first.
pub fn load_calls(conn: &Connection) -> AppResult<Vec<CallLogEntry>> {
    let mut stmt =
        conn.prepare("SELECT * FROM call_logs ORDER BY start_time DESC, created_at DESC")?;
    let rows = stmt.query_map([], map_call_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn clear_calls(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM call_logs", [])?)
}
