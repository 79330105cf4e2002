use crate::core::calculator::expiry::project_expiry;
use crate::models::communication::CallLogEntry;
use crate::models::project::Project;
use crate::utils::date::minute_str;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A flat, serializable export row.
pub trait ExportRecord: Serialize {
    /// Column names, in the same order as `to_row` and the serde fields.
    fn headers() -> &'static [&'static str];
    fn to_row(&self) -> Vec<String>;
}

/// Flat project row with its deadline state at export time.
#[derive(Serialize, Clone, Debug)]
pub struct ProjectExport {
    pub id: String,
    pub project_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub start_date: String,
    pub end_date: String,
    pub manager_email: String,
    pub status: String,
    pub progress: f64,
    pub days_left: i64,
    pub urgency: String,
}

impl ProjectExport {
    pub fn from_project(p: &Project, now: DateTime<Utc>) -> Self {
        let expiry = project_expiry(p, now);
        Self {
            id: p.id.clone(),
            project_name: p.project_name.clone(),
            client_name: p.client_name.clone(),
            client_email: p.client_email.clone(),
            client_phone: p.client_phone.clone(),
            start_date: p.start_str(),
            end_date: p.end_str(),
            manager_email: p.manager_email.clone(),
            status: p.status.label().to_string(),
            progress: p.progress,
            days_left: expiry.days_left,
            urgency: expiry.urgency.label().to_string(),
        }
    }
}

impl ExportRecord for ProjectExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "project_name",
            "client_name",
            "client_email",
            "client_phone",
            "start_date",
            "end_date",
            "manager_email",
            "status",
            "progress",
            "days_left",
            "urgency",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.project_name.clone(),
            self.client_name.clone(),
            self.client_email.clone(),
            self.client_phone.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.manager_email.clone(),
            self.status.clone(),
            self.progress.to_string(),
            self.days_left.to_string(),
            self.urgency.clone(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct CallExport {
    pub id: String,
    pub project_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub caller_name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: i64,
    pub notes: String,
}

impl From<&CallLogEntry> for CallExport {
    fn from(c: &CallLogEntry) -> Self {
        Self {
            id: c.id.clone(),
            project_id: c.project_id.clone(),
            client_name: c.client_name.clone(),
            client_phone: c.client_phone.clone(),
            caller_name: c.caller_name.clone(),
            start_time: minute_str(&c.start_time),
            end_time: minute_str(&c.end_time),
            duration_seconds: c.duration_seconds,
            notes: c.notes.clone(),
        }
    }
}

impl ExportRecord for CallExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "project_id",
            "client_name",
            "client_phone",
            "caller_name",
            "start_time",
            "end_time",
            "duration_seconds",
            "notes",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.project_id.clone(),
            self.client_name.clone(),
            self.client_phone.clone(),
            self.caller_name.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.duration_seconds.to_string(),
            self.notes.clone(),
        ]
    }
}
