use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Projects", "projects"),
        ("Call logs", "call_logs"),
        ("Email templates", "email_templates"),
        ("Outbox messages", "outbox"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let migrations = applied_versions(&pool.conn)?;
    println!(
        "{}• Migrations applied:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        migrations.len(),
        RESET
    );
    if let Some(last) = migrations.last() {
        println!("    latest: {last}");
    }

    //
    // 3) PROJECT DATE RANGE
    //
    let first_start: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_date) FROM projects", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_end: Option<String> = pool
        .conn
        .query_row("SELECT MAX(end_date) FROM projects", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt = |v: Option<String>| {
        v.map(|s| s.chars().take(10).collect::<String>())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Project date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first_start));
    println!("    to:   {}", fmt(last_end));

    println!();
    Ok(())
}
