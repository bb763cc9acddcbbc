use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "refined", bin_name = "refined", version)]
#[command(
    about = "Show and clear the active refinements of a search query state",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Query state JSON file ("-" reads stdin)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Search results JSON file, for facet counts
    #[arg(short, long, global = true, value_name = "FILE")]
    pub results: Option<PathBuf>,

    /// Widget configuration JSON file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print refinements as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List the active refinements (default)
    #[command(alias = "ls")]
    List,

    /// Print the state with one refinement removed
    #[command(alias = "rm")]
    Clear {
        /// Position of the refinement, as shown by `list` (1-based)
        index: usize,
    },

    /// Print the state with every shown refinement removed
    ClearAll,
}
