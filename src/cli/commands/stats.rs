use crate::config::Config;
use crate::core::calculator::expiry::project_expiry;
use crate::core::clock::Clock;
use crate::core::projects::dashboard_stats;
use crate::db::pool::DbPool;
use crate::db::queries::load_projects;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{BLUE, GREEN, GREY, RED, RESET, YELLOW, color_for_status};
use crate::utils::formatting::{days_label, percent, truncate};

const RECENT_ACTIVITY: usize = 5;

pub fn handle(cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let projects = load_projects(&pool.conn)?;
    let now = clock.now();
    let stats = dashboard_stats(&projects, now);

    header("Dashboard");

    println!("  Total projects : {}", stats.total);
    println!("  {GREEN}Completed{RESET}      : {}", stats.completed);
    println!("  {BLUE}On track{RESET}       : {}", stats.on_track);
    println!("  {RED}At risk{RESET}        : {}", stats.at_risk);
    println!("  {GREY}Pending{RESET}        : {}", stats.pending);
    println!("  Active clients : {}", stats.active_clients);
    println!("  {YELLOW}Expiring soon{RESET}  : {}", stats.expiring);
    println!("  {RED}Overdue{RESET}        : {}", stats.overdue);

    if projects.is_empty() {
        return Ok(());
    }

    println!("\n  Recent activity:");
    for p in projects.iter().take(RECENT_ACTIVITY) {
        let expiry = project_expiry(p, now);
        println!(
            "   • {:<28} {}{:<9}{RESET} {:>6}  ends {}",
            truncate(&p.project_name, 28),
            color_for_status(p.status),
            p.status.label(),
            percent(p.progress),
            days_label(expiry.days_left)
        );
    }

    Ok(())
}
