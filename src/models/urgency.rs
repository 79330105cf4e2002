use serde::Serialize;

/// Deadline urgency of a project relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    /// Past its deadline and not completed.
    Overdue,
    /// Deadline between 1 and 15 days away, inclusive.
    Expiring,
    Normal,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Expiring => "expiring",
            Urgency::Normal => "normal",
        }
    }

    pub fn is_expiring(&self) -> bool {
        matches!(self, Urgency::Expiring)
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Urgency::Overdue)
    }
}
