//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Binary inventory for your PATH.
///
/// Discovers binaries installed by Homebrew, npm, and pip, sweeps the
/// usual bin directories for "ghost" binaries nobody claims, and flags
/// name collisions between sources.
#[derive(Parser, Debug)]
#[command(name = "binscout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the system for binaries across all package managers
    Scan(ScanArgs),

    /// Scan and list binaries, optionally filtered to ghosts or conflicts
    List(ListArgs),

    /// Check which package managers are available on this system
    Doctor,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Scan a single package manager (homebrew, npm, pip, manual)
    #[arg(short, long)]
    pub manager: Option<String>,

    /// Per-command timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show only ghost binaries (no package manager claims them)
    #[arg(long)]
    pub ghosts: bool,

    /// Show only binaries with name conflicts
    #[arg(long, conflicts_with = "ghosts")]
    pub conflicts: bool,
}
