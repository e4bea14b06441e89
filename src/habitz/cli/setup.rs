use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habitz::day::parse_iso_day;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_iso_day(s).ok_or_else(|| format!("expected YYYY-MM-DD, got `{}`", s))
}

#[derive(Parser, Debug)]
#[command(name = "habitz", bin_name = "habitz", version = get_version())]
#[command(about = "A small daily habit checklist", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true, hide = true, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's checklist
    #[command(alias = "ls")]
    List,

    /// Add a habit
    #[command(alias = "a")]
    Add {
        /// Name of the habit (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark habits done (or not done again)
    #[command(name = "done", alias = "toggle", alias = "d")]
    Done {
        /// Habits to toggle (e.g. 1 3-4, or a name)
        #[arg(required = true, num_args = 1..)]
        habits: Vec<String>,
    },

    /// Change a habit's name or description
    #[command(alias = "e")]
    Edit {
        /// Habit to edit (number, id or name)
        habit: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove habits
    #[command(alias = "rm")]
    Remove {
        /// Habits to remove (e.g. 1 3-4, or a name)
        #[arg(required = true, num_args = 1..)]
        habits: Vec<String>,
    },

    /// Uncheck every habit for today
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete stored habits and start over from the default list
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print where habits are stored
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default-description)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
