use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::gantt::render_gantt;
use crate::db::pool::DbPool;
use crate::db::queries::load_projects;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Timeline { width } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let projects = load_projects(&pool.conn)?;
        let width = width.unwrap_or(cfg.gantt_width);

        print!("{}", render_gantt(&projects, clock.now(), width));
    }
    Ok(())
}
