use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::import::{ImportLogic, ImportOptions};
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config, clock: Arc<dyn Clock>) -> AppResult<()> {
    if let Commands::Import {
        file,
        replace,
        no_alerts,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let opts = ImportOptions {
            replace: *replace,
            alerts: !*no_alerts,
        };
        ImportLogic::import(&mut pool, cfg, file, opts, clock)?;
    }
    Ok(())
}
