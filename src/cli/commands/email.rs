use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::communication::CommunicationLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Email {
        project,
        template,
        from,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        CommunicationLogic::email(&pool.conn, cfg, project, template, from.clone())?;
    }
    Ok(())
}
