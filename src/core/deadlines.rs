//! `alerts` command: drive a session against the persisted project store.

use crate::config::Config;
use crate::core::alerts::PassReport;
use crate::core::clock::Clock;
use crate::core::notify::OutboxMailer;
use crate::core::session::{Session, SessionSummary};
use crate::core::store::{ProjectStore, StoreEvent};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_store, store_revision};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use rusqlite::Connection;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub interval: Duration,
    /// Stop after this many polls (`None` = until interrupted).
    pub ticks: Option<u64>,
}

pub struct AlertsLogic;

impl AlertsLogic {
    pub fn run(
        pool: &mut DbPool,
        cfg: &Config,
        clock: Arc<dyn Clock>,
        watch: Option<WatchOptions>,
    ) -> AppResult<SessionSummary> {
        let conn = &pool.conn;
        let mut session = Session::start(clock, &cfg.default_manager_email);
        let mailer = OutboxMailer::new(conn, &cfg.sender_email);

        ttlog_soft(
            conn,
            "session_start",
            "",
            &format!("Alert session started at {}", session.started_at().to_rfc3339()),
        );

        let store = load_store(conn)?;
        info(format!(
            "Checking {} project(s) for approaching deadlines…",
            store.len()
        ));
        let report = session.observe(&store, &mailer);
        Self::log_report(conn, &store, &report);
        Self::print_report(&report);

        if let Some(w) = watch {
            info(format!(
                "Watching for project changes every {}s…",
                w.interval.as_secs()
            ));

            let mut tick = 0u64;
            while w.ticks.is_none_or(|max| tick < max) {
                thread::sleep(w.interval);
                tick += 1;

                let revision = store_revision(conn)?;
                if session.last_revision() == Some(revision) {
                    continue;
                }

                let store = load_store(conn)?;
                let event = StoreEvent::Replaced {
                    revision: store.revision(),
                    count: store.len(),
                };
                info(format!(
                    "Project set changed (revision {}), re-checking…",
                    store.revision()
                ));
                let report = session.on_store_event(event, &store, &mailer);
                Self::log_report(conn, &store, &report);
                Self::print_report(&report);
            }
        }

        let summary = session.end();
        ttlog_soft(
            conn,
            "session_end",
            "",
            &format!(
                "{} pass(es), {} alert(s) sent, {} failed",
                summary.passes, summary.alerts_sent, summary.alerts_failed
            ),
        );

        Ok(summary)
    }

    /// Write one log line per dispatched or failed alert.
    pub fn log_report(conn: &Connection, store: &ProjectStore, report: &PassReport) {
        for sent in &report.sent {
            let name = store
                .find(&sent.project_id)
                .map(|p| p.project_name.as_str())
                .unwrap_or("");
            ttlog_soft(
                conn,
                "alert_sent",
                &sent.project_id,
                &format!(
                    "Deadline alert for \"{}\" sent to {} ({} day(s) left)",
                    name, sent.recipient, sent.days_left
                ),
            );
        }

        for failed in &report.failed {
            ttlog_soft(
                conn,
                "alert_failed",
                &failed.project_id,
                &format!("Alert to {} failed: {}", failed.recipient, failed.reason),
            );
        }
    }

    pub fn print_report(report: &PassReport) {
        for failed in &report.failed {
            error(format!(
                "Alert for {} to {} failed: {}",
                failed.project_id, failed.recipient, failed.reason
            ));
        }

        if report.sent.is_empty() {
            info(format!(
                "No new deadline alerts ({} project(s) checked, {} already alerted).",
                report.evaluated,
                report.already_alerted.len()
            ));
        } else {
            success(format!(
                "{} deadline alert(s) sent ({} project(s) checked).",
                report.sent.len(),
                report.evaluated
            ));
        }
    }
}
