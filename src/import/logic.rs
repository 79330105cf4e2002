use crate::config::Config;
use crate::core::alerts::PassReport;
use crate::core::clock::Clock;
use crate::core::deadlines::AlertsLogic;
use crate::core::notify::OutboxMailer;
use crate::core::session::Session;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_store, save_store};
use crate::errors::{AppError, AppResult};
use crate::import::ImportFormat;
use crate::import::mapping::{FieldDefault, map_rows};
use crate::import::reader::{RawRow, read_csv, read_xlsx};
use crate::models::project::Project;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use std::collections::HashSet;
use std::io;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Replace the whole project set instead of appending to it.
    pub replace: bool,
    /// Run a deadline alert pass on the new project set.
    pub alerts: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            replace: false,
            alerts: true,
        }
    }
}

#[derive(Debug)]
pub struct ImportSummary {
    pub imported: usize,
    pub total: usize,
    pub revision: u64,
    pub defaulted: Vec<FieldDefault>,
    pub pass: Option<PassReport>,
}

/// High-level business logic for the `import` command.
pub struct ImportLogic;

impl ImportLogic {
    pub fn read_rows(file: &str) -> AppResult<Vec<RawRow>> {
        let path = expand_tilde(file);

        if !path.exists() {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Import file not found: {}", path.display()),
            )));
        }

        match ImportFormat::from_path(&path)? {
            ImportFormat::Csv => read_csv(&path),
            ImportFormat::Xlsx => read_xlsx(&path),
        }
    }

    pub fn import(
        pool: &mut DbPool,
        cfg: &Config,
        file: &str,
        opts: ImportOptions,
        clock: Arc<dyn Clock>,
    ) -> AppResult<ImportSummary> {
        let rows = Self::read_rows(file)?;
        info(format!("Read {} row(s) from {}", rows.len(), file));

        //
        // 1. Map rows → projects (never rejects)
        //
        let mapped = map_rows(&rows, clock.now());
        for d in &mapped.defaulted {
            warning(format!(
                "Row {}: unreadable {} '{}', default used",
                d.row, d.field, d.raw
            ));
        }

        //
        // 2. Replace the project set
        //
        let mut store = load_store(&pool.conn)?;
        let mut batch = mapped.projects;
        let imported = batch.len();
        let event = if opts.replace {
            store.replace(batch)
        } else {
            disambiguate_ids(store.projects(), &mut batch);
            store.append(batch)
        };
        save_store(&pool.conn, &store)?;

        ttlog_soft(
            &pool.conn,
            "import",
            file,
            &format!(
                "{} project(s) {} ({} total, revision {})",
                imported,
                if opts.replace { "replaced" } else { "appended" },
                store.len(),
                store.revision()
            ),
        );

        success(format!(
            "Imported {} project(s); store now holds {}.",
            imported,
            store.len()
        ));

        //
        // 3. React to the replacement with one alert pass
        //
        let pass = if opts.alerts {
            let mut session = Session::start(clock, &cfg.default_manager_email);
            let mailer = OutboxMailer::new(&pool.conn, &cfg.sender_email);
            let report = session.on_store_event(event, &store, &mailer);
            AlertsLogic::log_report(&pool.conn, &store, &report);
            AlertsLogic::print_report(&report);
            session.end();
            Some(report)
        } else {
            None
        };

        Ok(ImportSummary {
            imported,
            total: store.len(),
            revision: store.revision(),
            defaulted: mapped.defaulted,
            pass,
        })
    }
}

/// Suffix batch ids that collide with ids already in the store
/// (two imports within the same millisecond).
fn disambiguate_ids(existing: &[Project], batch: &mut [Project]) {
    let mut taken: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();

    for p in batch.iter_mut() {
        if taken.contains(&p.id) {
            let base = p.id.clone();
            let mut n = 1;
            while taken.contains(&format!("{base}-{n}")) {
                n += 1;
            }
            p.id = format!("{base}-{n}");
        }
        taken.insert(p.id.clone());
    }
}
