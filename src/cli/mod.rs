pub mod run;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanboard-digest")]
#[command(
    author,
    version,
    about = "Kanboard task digest with an LLM summary, saved to disk and emailed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch tasks, build the report, summarize, save and email it
    Run(RunArgs),

    /// Print JSON Schema for config validation
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// Path to config file (default: kanboard-digest.yaml, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the report and summary instead of emailing them
    #[arg(long)]
    pub dry_run: bool,

    /// Override the Kanboard project id
    #[arg(long)]
    pub project_id: Option<u64>,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
