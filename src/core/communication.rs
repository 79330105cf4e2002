//! Client communication: email templates, template mails and the call log.

use crate::config::Config;
use crate::core::notify::{Notifier, OutboxMailer};
use crate::db::log::ttlog_soft;
use crate::db::queries::{
    clear_calls, delete_template, find_project, find_template, insert_call, insert_template,
    load_calls, load_templates,
};
use crate::errors::{AppError, AppResult};
use crate::models::communication::{CallLogEntry, EmailPayload, EmailTemplate};
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::minute_str;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

/// How the length of a call was given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTiming {
    /// Call that just ended and lasted this many seconds.
    Duration(i64),
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl CallTiming {
    /// Resolve to `(start, end, seconds)`.
    pub fn resolve(self, now: DateTime<Utc>) -> AppResult<(DateTime<Utc>, DateTime<Utc>, i64)> {
        match self {
            CallTiming::Duration(secs) if secs < 0 => Err(AppError::InvalidCall(format!(
                "duration must not be negative ({secs}s)"
            ))),
            CallTiming::Duration(secs) => Duration::try_seconds(secs)
                .and_then(|d| now.checked_sub_signed(d))
                .map(|start| (start, now, secs))
                .ok_or_else(|| AppError::InvalidCall(format!("duration too large ({secs}s)"))),
            CallTiming::Range { start, end } if end < start => Err(AppError::InvalidCall(
                format!("call ends ({}) before it starts ({})", minute_str(&end), minute_str(&start)),
            )),
            CallTiming::Range { start, end } => {
                let millis = (end - start).num_milliseconds();
                let secs = (millis as f64 / 1000.0).round() as i64;
                Ok((start, end, secs))
            }
        }
    }
}

pub struct CommunicationLogic;

impl CommunicationLogic {
    // ---------------------------
    // Templates
    // ---------------------------

    pub fn print_templates(conn: &Connection) -> AppResult<()> {
        let templates = load_templates(conn)?;

        if templates.is_empty() {
            warning("No email templates defined.");
            return Ok(());
        }

        println!("✉️  Email templates:\n");
        let mut table = Table::new(vec![
            Column::new("ID", 20),
            Column::new("NAME", 20),
            Column::new("SUBJECT", 32),
            Column::new("KIND", 7),
        ]);
        for t in &templates {
            table.add_row(vec![
                t.id.clone(),
                truncate(&t.name, 20),
                truncate(&t.subject, 32),
                if t.is_custom {
                    format!("{CYAN}custom{RESET}")
                } else {
                    format!("{GREY}default{RESET}")
                },
            ]);
        }
        print!("{}", table.render("-"));
        Ok(())
    }

    pub fn add_template(
        conn: &Connection,
        name: &str,
        subject: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> AppResult<EmailTemplate> {
        for (field, value) in [("name", name), ("subject", subject), ("body", body)] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidTemplate(format!("{field} must not be empty")));
            }
        }

        let template = EmailTemplate {
            id: format!("custom-{}", now.timestamp_millis()),
            name: name.trim().to_string(),
            subject: subject.trim().to_string(),
            body: body.to_string(),
            is_custom: true,
        };

        insert_template(conn, &template, &now.to_rfc3339())?;
        ttlog_soft(
            conn,
            "template_add",
            &template.id,
            &format!("Template \"{}\" created", template.name),
        );

        success(format!("Template '{}' saved as {}", template.name, template.id));
        Ok(template)
    }

    pub fn delete_template(conn: &Connection, id: &str, assume_yes: bool) -> AppResult<bool> {
        let template = find_template(conn, id)?;

        if !assume_yes
            && !confirm(format!(
                "Are you sure you want to delete template '{}'?",
                template.name
            ))?
        {
            info("Template kept.");
            return Ok(false);
        }

        delete_template(conn, id)?;
        ttlog_soft(
            conn,
            "template_del",
            id,
            &format!("Template \"{}\" deleted", template.name),
        );
        success(format!("Template {id} deleted."));
        Ok(true)
    }

    // ---------------------------
    // Email
    // ---------------------------

    /// Send a template to the project's client through `notifier`.
    pub fn send_template(
        conn: &Connection,
        cfg: &Config,
        project_id: &str,
        template_id: &str,
        from: Option<String>,
        notifier: &dyn Notifier,
    ) -> AppResult<EmailPayload> {
        let project = find_project(conn, project_id)?;
        let template = find_template(conn, template_id)?;

        let to = if project.client_email.trim().is_empty() {
            cfg.default_client_email.clone()
        } else {
            project.client_email.clone()
        };

        let payload = EmailPayload::new(to, template.subject, template.body).from_address(from);
        notifier.send(&payload)?;

        ttlog_soft(
            conn,
            "email",
            &project.id,
            &format!(
                "Template {} sent to {} for \"{}\"",
                template.id, payload.to, project.project_name
            ),
        );

        Ok(payload)
    }

    /// `send_template` through the outbox mailer.
    pub fn email(
        conn: &Connection,
        cfg: &Config,
        project_id: &str,
        template_id: &str,
        from: Option<String>,
    ) -> AppResult<EmailPayload> {
        let mailer = OutboxMailer::new(conn, &cfg.sender_email);
        let payload = Self::send_template(conn, cfg, project_id, template_id, from, &mailer)?;
        success(format!("Email sent to {}", payload.to));
        Ok(payload)
    }

    // ---------------------------
    // Calls
    // ---------------------------

    pub fn log_call(
        conn: &Connection,
        cfg: &Config,
        project_id: &str,
        timing: CallTiming,
        caller: Option<String>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<CallLogEntry> {
        let project = find_project(conn, project_id)?;
        let (start_time, end_time, duration_seconds) = timing.resolve(now)?;

        let entry = CallLogEntry {
            id: format!("call-{}", now.timestamp_millis()),
            project_id: project.id.clone(),
            client_name: project.client_name.clone(),
            client_phone: project.client_phone.clone(),
            caller_name: caller
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| cfg.caller_name.clone()),
            start_time,
            end_time,
            duration_seconds,
            notes: notes.unwrap_or_else(|| "Call logged from the command line".to_string()),
        };

        insert_call(conn, &entry, &now.to_rfc3339())?;
        ttlog_soft(
            conn,
            "call",
            &entry.project_id,
            &format!(
                "Call with {} ({}) by {}, {}",
                entry.client_name,
                entry.client_phone,
                entry.caller_name,
                entry.duration_mmss()
            ),
        );

        success(format!(
            "Call with {} logged ({}).",
            entry.client_name,
            entry.duration_mmss()
        ));
        Ok(entry)
    }

    pub fn print_calls(conn: &Connection, separator: &str) -> AppResult<()> {
        let calls = load_calls(conn)?;

        if calls.is_empty() {
            warning("No calls logged yet.");
            return Ok(());
        }

        println!("📞 Call log ({} entries):\n", calls.len());
        let mut table = Table::new(vec![
            Column::new("STARTED", 16),
            Column::new("CLIENT", 20),
            Column::new("PHONE", 16),
            Column::new("CALLER", 18),
            Column::new("DUR", 6),
            Column::new("NOTES", 30),
        ]);
        for c in &calls {
            table.add_row(vec![
                minute_str(&c.start_time),
                truncate(&c.client_name, 20),
                truncate(&c.client_phone, 16),
                truncate(&c.caller_name, 18),
                c.duration_mmss(),
                truncate(&c.notes, 30),
            ]);
        }
        print!("{}", table.render(separator));
        Ok(())
    }

    pub fn clear_calls(conn: &Connection, assume_yes: bool) -> AppResult<usize> {
        if !assume_yes && !confirm("Delete the whole call log?")? {
            info("Call log kept.");
            return Ok(0);
        }

        let n = clear_calls(conn)?;
        ttlog_soft(
            conn,
            "calls_cleared",
            "",
            &format!("{n} call log entr{} removed", if n == 1 { "y" } else { "ies" }),
        );
        success(format!("Call log cleared ({n} removed)."));
        Ok(n)
    }
}
