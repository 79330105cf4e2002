use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::projects::{ListFilter, filter_projects, render_list};
use crate::db::pool::DbPool;
use crate::db::queries::load_projects;
use crate::errors::{AppError, AppResult};
use crate::models::status::ProjectStatus;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::List {
        status,
        expiring,
        overdue,
    } = cmd
    {
        let status = match status {
            Some(s) => Some(
                ProjectStatus::parse_loose(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
            ),
            None => None,
        };

        let filter = ListFilter {
            status,
            expiring: *expiring,
            overdue: *overdue,
        };

        let pool = DbPool::new(&cfg.database)?;
        let projects = load_projects(&pool.conn)?;
        let now = clock.now();
        let selected = filter_projects(&projects, &filter, now);

        if selected.is_empty() {
            warning("No projects match the selection.");
            return Ok(());
        }

        println!("📋 Projects ({} of {}):\n", selected.len(), projects.len());
        print!("{}", render_list(&selected, now, &cfg.separator_char));
    }
    Ok(())
}
