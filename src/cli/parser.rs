use clap::{Parser, Subcommand};

/// Command-line interface definition for rPaytracker
/// Check in and out of work sessions and follow what you have earned
#[derive(Parser)]
#[command(
    name = "rpaytracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small pay tracker: check in/out of work sessions and see session and gross pay",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Check in: open a new work session now
    #[command(name = "in")]
    CheckIn,

    /// Check out: close the open work session now
    #[command(name = "out")]
    CheckOut,

    /// Show session total, gross total and session time
    Status {
        #[arg(long, short = 'w', help = "Keep refreshing until Ctrl-C")]
        watch: bool,

        #[arg(long = "rate", help = "Hourly rate to use instead of the configured one")]
        rate: Option<f64>,
    },

    /// List sessions, newest first
    List {
        #[arg(long, short = 'n', help = "Show only the newest N sessions")]
        limit: Option<usize>,
    },

    /// Print the widget schedule computed from the published snapshot
    Widget {
        #[arg(long = "entries", help = "Number of entries to render")]
        entries: Option<usize>,

        #[arg(long = "interval", help = "Seconds between entries")]
        interval: Option<i64>,

        #[arg(long = "file", value_name = "FILE", help = "Snapshot file to read")]
        file: Option<String>,

        #[arg(long = "json", help = "Print entries as JSON")]
        json: bool,
    },
}
