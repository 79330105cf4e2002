use super::status::ProjectStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,            // ⇔ projects.id (opaque, stable)
    pub project_name: String,  // ⇔ projects.project_name
    pub client_name: String,   // ⇔ projects.client_name
    pub client_email: String,  // ⇔ projects.client_email ('' when unknown)
    pub client_phone: String,  // ⇔ projects.client_phone ('' when unknown)
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub manager_email: String, // ⇔ projects.manager_email ('' when unknown)
    pub status: ProjectStatus,
    pub progress: f64, // percentage, never clamped here
}

impl Project {
    /// Minimal constructor: contacts empty, status `Pending`, progress 0.
    pub fn new(
        id: impl Into<String>,
        project_name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            project_name: project_name.into(),
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            start_date,
            end_date,
            manager_email: String::new(),
            status: ProjectStatus::default(),
            progress: 0.0,
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_client(mut self, name: &str, email: &str, phone: &str) -> Self {
        self.client_name = name.to_string();
        self.client_email = email.to_string();
        self.client_phone = phone.to_string();
        self
    }

    pub fn with_manager(mut self, email: &str) -> Self {
        self.manager_email = email.to_string();
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn start_str(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }

    /// `true` when the end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }
}
