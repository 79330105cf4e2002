use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    Completed,
    #[default]
    Pending,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::OnTrack,
        ProjectStatus::AtRisk,
        ProjectStatus::Completed,
        ProjectStatus::Pending,
    ];

    /// Human-readable label, also used as the DB representation.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "On Track",
            ProjectStatus::AtRisk => "At Risk",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Pending => "Pending",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "On Track" => Some(ProjectStatus::OnTrack),
            "At Risk" => Some(ProjectStatus::AtRisk),
            "Completed" => Some(ProjectStatus::Completed),
            "Pending" => Some(ProjectStatus::Pending),
            _ => None,
        }
    }

    /// Lenient parser for spreadsheet cells and CLI flags:
    /// case-insensitive, accepts `on-track`, `on_track`, `ontrack`, ...
    pub fn parse_loose(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "ontrack" => Some(ProjectStatus::OnTrack),
            "atrisk" => Some(ProjectStatus::AtRisk),
            "completed" | "complete" | "done" => Some(ProjectStatus::Completed),
            "pending" => Some(ProjectStatus::Pending),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProjectStatus::Completed)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
