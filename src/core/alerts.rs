//! Deadline alert scheduler.
//!
//! One pass walks the project set in store order, judges every project
//! against a single `now`, and notifies the manager of each newly expiring
//! project at most once per session. Only successful sends enter the
//! alert record, so a failed project is retried on the next pass.

use crate::core::calculator::expiry::project_expiry;
use crate::core::clock::Clock;
use crate::core::notify::{Notifier, deadline_alert};
use crate::models::project::Project;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Project ids already alerted in this session. Only grows.
#[derive(Debug, Default, Clone)]
pub struct AlertRecord {
    ids: HashSet<String>,
}

impl AlertRecord {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `false` if the id was already present.
    fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentAlert {
    pub project_id: String,
    pub recipient: String,
    pub days_left: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAlert {
    pub project_id: String,
    pub recipient: String,
    pub reason: String,
}

/// Outcome of one scheduler pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub now: DateTime<Utc>,
    pub evaluated: usize,
    pub sent: Vec<SentAlert>,
    pub already_alerted: Vec<String>,
    pub failed: Vec<FailedAlert>,
}

impl PassReport {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            evaluated: 0,
            sent: Vec::new(),
            already_alerted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

pub struct AlertScheduler {
    clock: Arc<dyn Clock>,
    fallback_manager: String,
    record: Mutex<AlertRecord>,
}

impl AlertScheduler {
    pub fn new(clock: Arc<dyn Clock>, fallback_manager: &str) -> Self {
        Self {
            clock,
            fallback_manager: fallback_manager.to_string(),
            record: Mutex::new(AlertRecord::default()),
        }
    }

    /// Run one pass over `projects`.
    ///
    /// The record lock is held for the whole pass: an overlapping pass waits
    /// until this one has finished updating the record.
    pub fn run_pass(&self, projects: &[Project], notifier: &dyn Notifier) -> PassReport {
        let mut record = self.record.lock().unwrap_or_else(|e| e.into_inner());

        let now = self.clock.now();
        let mut report = PassReport::new(now);

        for project in projects {
            report.evaluated += 1;

            let expiry = project_expiry(project, now);
            if !expiry.urgency.is_expiring() {
                continue;
            }

            if record.contains(&project.id) {
                report.already_alerted.push(project.id.clone());
                continue;
            }

            let payload = deadline_alert(project, expiry.days_left, &self.fallback_manager);

            match notifier.send(&payload) {
                Ok(()) => {
                    record.insert(&project.id);
                    report.sent.push(SentAlert {
                        project_id: project.id.clone(),
                        recipient: payload.to,
                        days_left: expiry.days_left,
                    });
                }
                Err(e) => report.failed.push(FailedAlert {
                    project_id: project.id.clone(),
                    recipient: payload.to,
                    reason: e.to_string(),
                }),
            }
        }

        report
    }

    pub fn is_alerted(&self, id: &str) -> bool {
        self.record
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }

    /// Copy of the current record.
    pub fn record(&self) -> AlertRecord {
        self.record
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
