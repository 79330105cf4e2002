//! Explicitly owned session context.
//!
//! A session starts empty, reacts to `StoreEvent`s with one scheduler pass
//! each, and drops its alert record when it ends.

use crate::core::alerts::{AlertScheduler, PassReport};
use crate::core::clock::Clock;
use crate::core::notify::Notifier;
use crate::core::store::{ProjectStore, StoreEvent};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct Session {
    started_at: DateTime<Utc>,
    scheduler: AlertScheduler,
    passes: usize,
    alerts_sent: usize,
    alerts_failed: usize,
    last_revision: Option<u64>,
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub passes: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
}

impl Session {
    pub fn start(clock: Arc<dyn Clock>, fallback_manager: &str) -> Self {
        Self {
            started_at: clock.now(),
            scheduler: AlertScheduler::new(clock, fallback_manager),
            passes: 0,
            alerts_sent: 0,
            alerts_failed: 0,
            last_revision: None,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn scheduler(&self) -> &AlertScheduler {
        &self.scheduler
    }

    /// Revision of the store seen by the last pass.
    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }

    /// One "project set replaced" event → one scheduler pass.
    pub fn on_store_event(
        &mut self,
        event: StoreEvent,
        store: &ProjectStore,
        notifier: &dyn Notifier,
    ) -> PassReport {
        let StoreEvent::Replaced { revision, .. } = event;
        self.last_revision = Some(revision);

        let report = self.scheduler.run_pass(store.projects(), notifier);
        self.passes += 1;
        self.alerts_sent += report.sent.len();
        self.alerts_failed += report.failed.len();
        report
    }

    /// Treat a freshly loaded store as a replacement of the (empty) session view.
    pub fn observe(&mut self, store: &ProjectStore, notifier: &dyn Notifier) -> PassReport {
        let event = StoreEvent::Replaced {
            revision: store.revision(),
            count: store.len(),
        };
        self.on_store_event(event, store, notifier)
    }

    pub fn end(self) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at,
            passes: self.passes,
            alerts_sent: self.alerts_sent,
            alerts_failed: self.alerts_failed,
        }
    }
}
