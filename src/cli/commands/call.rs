use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::communication::{CallTiming, CommunicationLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_datetime;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Call {
        project,
        duration,
        start,
        end,
        caller,
        notes,
    } = cmd
    {
        let timing = match (duration, start, end) {
            (Some(secs), _, _) => CallTiming::Duration(*secs),
            (None, Some(s), Some(e)) => CallTiming::Range {
                start: parse_datetime(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                end: parse_datetime(e).ok_or_else(|| AppError::InvalidDate(e.clone()))?,
            },
            _ => {
                return Err(AppError::InvalidCall(
                    "give either --duration or both --start and --end".into(),
                ));
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        CommunicationLogic::log_call(
            &pool.conn,
            cfg,
            project,
            timing,
            caller.clone(),
            notes.clone(),
            clock.now(),
        )?;
    }
    Ok(())
}
