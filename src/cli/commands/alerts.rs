use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::deadlines::{AlertsLogic, WatchOptions};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::sync::Arc;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, clock: Arc<dyn Clock>) -> AppResult<()> {
    if let Commands::Alerts {
        watch,
        interval,
        ticks,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let watch = watch.then(|| WatchOptions {
            interval: Duration::from_secs((*interval).max(1)),
            ticks: *ticks,
        });

        let summary = AlertsLogic::run(&mut pool, cfg, clock, watch)?;

        info(format!(
            "Session closed: {} pass(es), {} alert(s) sent, {} failed.",
            summary.passes, summary.alerts_sent, summary.alerts_failed
        ));
    }
    Ok(())
}
