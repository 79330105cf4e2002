use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        calls,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool, format, file, *calls, *force, clock.now())?;
    }
    Ok(())
}
