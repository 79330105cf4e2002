//! Project listing and dashboard statistics.

use crate::core::calculator::expiry::project_expiry;
use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use crate::models::urgency::Urgency;
use crate::utils::colors::{RESET, color_for_days_left, color_for_status, color_for_urgency};
use crate::utils::formatting::{days_label, percent};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub status: Option<ProjectStatus>,
    pub expiring: bool,
    pub overdue: bool,
}

impl ListFilter {
    /// `expiring` and `overdue` together select projects matching either.
    pub fn matches(&self, project: &Project, now: DateTime<Utc>) -> bool {
        if let Some(s) = self.status
            && project.status != s
        {
            return false;
        }

        if !self.expiring && !self.overdue {
            return true;
        }

        let urgency = project_expiry(project, now).urgency;
        (self.expiring && urgency.is_expiring()) || (self.overdue && urgency.is_overdue())
    }
}

pub fn filter_projects<'a>(
    projects: &'a [Project],
    filter: &ListFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p, now)).collect()
}

pub fn render_list(projects: &[&Project], now: DateTime<Utc>, separator: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 24),
        Column::new("PROJECT", 28),
        Column::new("CLIENT", 20),
        Column::new("START", 10),
        Column::new("END", 10),
        Column::new("STATUS", 9),
        Column::new("PROGRESS", 8),
        Column::new("DEADLINE", 14),
        Column::new("URGENCY", 8),
    ]);

    for p in projects {
        let expiry = project_expiry(p, now);
        let status_color = color_for_status(p.status);
        let days_color = color_for_days_left(expiry.days_left, expiry.urgency);
        let urgency_color = color_for_urgency(expiry.urgency);

        table.add_row(vec![
            p.id.clone(),
            p.project_name.clone(),
            p.client_name.clone(),
            p.start_str(),
            p.end_str(),
            format!("{status_color}{}{RESET}", p.status),
            percent(p.progress),
            format!("{days_color}{}{RESET}", days_label(expiry.days_left)),
            format!("{urgency_color}{}{RESET}", expiry.urgency.label()),
        ]);
    }

    table.render(separator)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub at_risk: usize,
    pub on_track: usize,
    pub pending: usize,
    pub active_clients: usize,
    pub expiring: usize,
    pub overdue: usize,
}

pub fn dashboard_stats(projects: &[Project], now: DateTime<Utc>) -> DashboardStats {
    let mut stats = DashboardStats {
        total: projects.len(),
        ..Default::default()
    };

    let mut clients = BTreeSet::new();

    for p in projects {
        match p.status {
            ProjectStatus::Completed => stats.completed += 1,
            ProjectStatus::AtRisk => stats.at_risk += 1,
            ProjectStatus::OnTrack => stats.on_track += 1,
            ProjectStatus::Pending => stats.pending += 1,
        }

        clients.insert(p.client_name.as_str());

        match project_expiry(p, now).urgency {
            Urgency::Expiring => stats.expiring += 1,
            Urgency::Overdue => stats.overdue += 1,
            Urgency::Normal => {}
        }
    }

    stats.active_clients = clients.len();
    stats
}
