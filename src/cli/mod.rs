//! CLI module for Baseera
//!
//! Provides command-line interface parsing and handling for the baseera binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod init;
pub mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Baseera - Islamic reminders and Q&A
///
/// Serves random Quran verses and hadith, estimates the Hijri date, keeps
/// bookmarks, and forwards questions to an answering backend.
#[derive(Parser, Debug)]
#[command(
    name = "baseera",
    version,
    about = "Baseera - Islamic reminders and Q&A",
    long_about = "Serves random Quran verses and hadith with retry and fallback, estimates the\n\
                  Hijri date, keeps bookmarked reminders, and forwards questions to an\n\
                  answering backend.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new project.",
    after_help = "EXAMPLES:\n    \
                  baseera init                   # Scaffold baseera.toml and .env.example\n    \
                  baseera                        # Start the server\n    \
                  baseera reminder --offline     # Today's built-in reminder\n    \
                  baseera date --date 2024-03-12 # Hijri estimate for a date\n    \
                  baseera ask What is zakat?     # Ask the answering backend"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "baseera.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print a random Quran verse or hadith
    Reminder {
        /// Use the built-in daily rotation instead of the remote APIs
        #[arg(long)]
        offline: bool,

        /// Print the reminder as JSON
        #[arg(long)]
        json: bool,

        /// Bookmark the printed reminder
        #[arg(short, long)]
        bookmark: bool,
    },

    /// Estimate the Hijri date
    Date {
        /// Gregorian date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a question about Islam
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Manage bookmarked reminders
    #[command(subcommand)]
    Bookmarks(BookmarkCommands),

    /// Initialize a new Baseera project with configuration files
    ///
    /// Creates baseera.toml, .env.example, the data/ directory
    /// and a .gitignore.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Configure the canned mock chat backend
        #[arg(long)]
        mock_chat: bool,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file and report warnings
        #[arg(long)]
        validate: bool,
    },
}

/// Bookmark management subcommands
#[derive(Subcommand, Debug)]
pub enum BookmarkCommands {
    /// List all bookmarked reminders
    List,

    /// Remove the bookmark with the given source
    Remove {
        /// Source of the reminder, e.g. "Quran 94:5"
        source: String,
    },

    /// Remove all bookmarks
    Clear,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The output helper matching `--no-color`
    pub fn output(&self) -> output::Output {
        if self.no_color {
            output::Output::no_color()
        } else {
            output::Output::new()
        }
    }
}
