//! Notification sender seam and the outbox-backed mailer used by the CLI.

use crate::db::queries::insert_outbox;
use crate::errors::AppResult;
use crate::models::communication::EmailPayload;
use crate::models::project::Project;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREY, RESET};
use chrono::Utc;
use rusqlite::Connection;

/// Anything that can deliver an email-like message.
pub trait Notifier {
    fn send(&self, payload: &EmailPayload) -> AppResult<()>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn send(&self, payload: &EmailPayload) -> AppResult<()> {
        (**self).send(payload)
    }
}

/// Simulated mail provider: every message lands in the `outbox` table and
/// is echoed to stdout.
pub struct OutboxMailer<'a> {
    conn: &'a Connection,
    default_from: String,
}

impl<'a> OutboxMailer<'a> {
    pub fn new(conn: &'a Connection, default_from: &str) -> Self {
        Self {
            conn,
            default_from: default_from.to_string(),
        }
    }
}

impl Notifier for OutboxMailer<'_> {
    fn send(&self, payload: &EmailPayload) -> AppResult<()> {
        let from = payload
            .from
            .clone()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| self.default_from.clone());

        insert_outbox(self.conn, &from, payload, &Utc::now().to_rfc3339())?;

        info(format!("📧 Mail to {}", payload.to));
        println!("{CYAN}From:{RESET}    {from}");
        println!("{CYAN}Subject:{RESET} {}", payload.subject);
        println!("{GREY}--- Body ---{RESET}");
        for line in payload.body.lines() {
            for wrapped in textwrap::wrap(line, 76) {
                println!("  {wrapped}");
            }
        }
        println!("{GREY}------------{RESET}");

        Ok(())
    }
}

/// Deadline alert addressed to the project's manager.
pub fn deadline_alert(project: &Project, days_left: i64, fallback_manager: &str) -> EmailPayload {
    let to = if project.manager_email.trim().is_empty() {
        fallback_manager.to_string()
    } else {
        project.manager_email.clone()
    };

    let subject = format!(
        "⚠️ Action Required: \"{}\" Expires in {} Days",
        project.project_name, days_left
    );

    let body = format!(
        "Hello Project Manager,\n\n\
         This is an automated alert to inform you that the project \"{}\" for client {} \
         is approaching its deadline on {}.\n\n\
         Current Status: {}\n\
         Progress: {}%\n\n\
         Please ensure all deliverables are on track.\n\n\
         Best,\n\
         ProjectFlow AI",
        project.project_name,
        project.client_name,
        project.end_str(),
        project.status,
        project.progress,
    );

    EmailPayload::new(to, subject, body)
}
