use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::communication::CommunicationLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Template {
        list,
        add,
        name,
        subject,
        body,
        del,
        yes,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *add {
            CommunicationLogic::add_template(
                &pool.conn,
                name.as_deref().unwrap_or_default(),
                subject.as_deref().unwrap_or_default(),
                body.as_deref().unwrap_or_default(),
                clock.now(),
            )?;
        }

        if let Some(id) = del {
            CommunicationLogic::delete_template(&pool.conn, id, *yes)?;
        }

        if *list || (!*add && del.is_none()) {
            CommunicationLogic::print_templates(&pool.conn)?;
        }
    }
    Ok(())
}
