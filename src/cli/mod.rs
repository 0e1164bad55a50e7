//! CLI interface using clap
//!
//! Provides the command-line interface for knowledge-digest

mod commands;

pub use commands::*;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// knowledge-digest - Summarize a source tree into a flat knowledge file
#[derive(Parser, Debug)]
#[command(name = "knowledge-digest")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments used when no subcommand is given
    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a directory and write its knowledge file (default)
    Generate(GenerateArgs),

    /// Print the knowledge items of a single file
    Analyze(AnalyzeArgs),
}

/// Arguments for generate command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Root directory to digest (prompted for when omitted).
    ///
    /// A directory named like a subcommand must be passed as `generate <ROOT>`.
    pub root: Option<String>,

    /// Directory to write the knowledge file into (defaults to current directory)
    #[arg(short, long, env = "KNOWLEDGE_DIGEST_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for analyze command
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// File to analyze
    pub target: PathBuf,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, treating a bare invocation as `generate`
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Generate(self.generate))
    }
}
