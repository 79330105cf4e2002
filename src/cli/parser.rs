use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for projectflow
/// CLI application to track project timelines and deadlines with SQLite
#[derive(Parser)]
#[command(
    name = "projectflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Project timelines, Gantt view, deadline alerts and client communication on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Freeze the clock at the given date/time (deterministic runs)
    #[arg(global = true, long = "now", hide = true, value_name = "DATETIME")]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Import projects from a CSV or XLSX file
    Import {
        /// Spreadsheet to read (.csv or .xlsx, first sheet)
        file: String,

        #[arg(long, help = "Replace all projects instead of appending")]
        replace: bool,

        #[arg(long = "no-alerts", help = "Skip the deadline alert pass after import")]
        no_alerts: bool,
    },

    /// Dashboard counters
    Stats,

    /// List projects
    List {
        #[arg(
            long,
            help = "Filter by status (on-track, at-risk, completed, pending)"
        )]
        status: Option<String>,

        #[arg(long, help = "Only projects ending within the alert window")]
        expiring: bool,

        #[arg(long, help = "Only projects past their end date")]
        overdue: bool,
    },

    /// Show the Gantt timeline
    Timeline {
        #[arg(long, help = "Chart width in columns (overrides gantt_width)")]
        width: Option<usize>,
    },

    /// Send deadline alerts for projects about to expire
    Alerts {
        #[arg(long, help = "Keep running and re-check whenever the projects change")]
        watch: bool,

        #[arg(
            long,
            default_value_t = 5,
            requires = "watch",
            help = "Polling interval in seconds"
        )]
        interval: u64,

        #[arg(long, requires = "watch", help = "Stop watching after N polls")]
        ticks: Option<u64>,
    },

    /// Manage email templates
    Template {
        #[arg(long, help = "List all templates")]
        list: bool,

        #[arg(
            long,
            requires_all = ["name", "subject", "body"],
            conflicts_with = "del",
            help = "Create a custom template"
        )]
        add: bool,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        body: Option<String>,

        #[arg(long, value_name = "ID", help = "Delete a template")]
        del: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Email a template to a project's client
    Email {
        #[arg(long, value_name = "ID")]
        project: String,

        #[arg(long, value_name = "ID")]
        template: String,

        #[arg(long, value_name = "ADDRESS", help = "Sender address (default: sender_email)")]
        from: Option<String>,
    },

    /// Log a call with a project's client
    Call {
        #[arg(long, value_name = "ID")]
        project: String,

        #[arg(
            long,
            value_name = "SECONDS",
            conflicts_with_all = ["start", "end"],
            required_unless_present = "start",
            help = "Length of a call that just ended"
        )]
        duration: Option<i64>,

        #[arg(long, value_name = "DATETIME", requires = "end")]
        start: Option<String>,

        #[arg(long, value_name = "DATETIME", requires = "start")]
        end: Option<String>,

        #[arg(long, help = "Who made the call (default: caller_name)")]
        caller: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show or clear the call log
    Calls {
        #[arg(long, help = "Print the call log")]
        print: bool,

        #[arg(long, help = "Delete every call log entry")]
        clear: bool,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export projects or call logs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'c', help = "Export the call log instead of projects")]
        calls: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
