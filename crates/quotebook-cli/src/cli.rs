use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quotebook_core::ResolutionStrategy;

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Random quotes with local storage and remote sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a random quote (uses the saved category filter)
    #[command(alias = "show")]
    Random {
        /// Pick from this category and remember it as the filter ("all" clears it)
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new quote
    #[command(alias = "new")]
    Add {
        /// Quote text
        text: Vec<String>,
        /// Quote category
        #[arg(short, long)]
        category: String,
        /// Optional author
        #[arg(short, long)]
        author: Option<String>,
    },
    /// List quotes with their positions
    List {
        /// Only show quotes in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or set the saved category filter
    Filter {
        /// Category to select ("all" clears the filter)
        category: Option<String>,
    },
    /// Delete a quote by its position in `quotebook list`
    Delete {
        /// 1-based position
        position: usize,
    },
    /// Replace all quotes with the built-in defaults
    Reset,
    /// Export quotes as JSON
    Export {
        /// Output path (defaults to quotes.json in the current directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Import quotes from a JSON file (appended as-is)
    Import {
        /// JSON file containing an array of quotes
        path: PathBuf,
    },
    /// Run one sync cycle against the remote source
    Sync {
        /// Strategy applied when conflicts are found
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep syncing on a timer and take resolution commands from stdin
    Watch {
        /// Seconds between sync cycles (overrides `QUOTEBOOK_SYNC_INTERVAL_SECS`)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
        /// Resolve conflicts automatically with this strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,
    },
    /// Send a quote to the remote endpoint
    Publish {
        /// 1-based position
        position: usize,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Take the remote category
    Remote,
    /// Keep the local quote
    Local,
    /// Keep both versions
    Merge,
}

impl From<StrategyArg> for ResolutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Remote => Self::Remote,
            StrategyArg::Local => Self::Local,
            StrategyArg::Merge => Self::Merge,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
