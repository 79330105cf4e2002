use crate::utils::formatting::seconds2mmss;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outgoing message handed to a `Notifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPayload {
    pub to: String,
    pub from: Option<String>,
    pub subject: String,
    pub body: String,
}

impl EmailPayload {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn from_address(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub is_custom: bool,
}

/// A logged call with a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallLogEntry {
    pub id: String,
    pub project_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub caller_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub notes: String,
}

impl CallLogEntry {
    /// Duration as `mm:ss`.
    pub fn duration_mmss(&self) -> String {
        seconds2mmss(self.duration_seconds)
    }
}
