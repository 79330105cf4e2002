use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::communication::CommunicationLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calls { print, clear, yes } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if *clear {
            CommunicationLogic::clear_calls(&pool.conn, *yes)?;
        }

        if *print || !*clear {
            CommunicationLogic::print_calls(&pool.conn, &cfg.separator_char)?;
        }
    }
    Ok(())
}
