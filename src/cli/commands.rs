use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `wisecompanion` - money-saving activity snapshots.
#[derive(Parser, Debug)]
#[command(name = "wisecompanion")]
#[command(version)]
#[command(about = "Build and query money-saving activity snapshots.", long_about = None)]
pub struct Cli {
    /// Config file (default: ./wisecompanion.toml, then ~/.wisecompanion/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch records from Airtable and rewrite the activities artifact
    Fetch,

    /// List activities from the artifact
    List {
        /// Artifact path or URL (overrides store.artifact_url / output.artifact_path)
        #[arg(long)]
        source: Option<String>,

        /// Page fragment, e.g. "#Bank" (unknown pages show everything)
        #[arg(long, conflicts_with = "category")]
        page: Option<String>,

        /// Category tag, e.g. Bank
        #[arg(short, long)]
        category: Option<String>,

        /// Sub-category tag, e.g. DailyTask (requires --category)
        #[arg(long, requires = "category")]
        sub: Option<String>,

        /// Source app name, or "全部"/"all" (requires --category)
        #[arg(long, requires = "category", conflicts_with = "sub")]
        app: Option<String>,
    },

    /// List the distinct source apps within a category
    Apps {
        /// Artifact path or URL
        #[arg(long)]
        source: Option<String>,

        /// Category tag, e.g. Bank
        #[arg(short, long)]
        category: String,
    },

    /// Show configuration and artifact status
    Status {
        /// Artifact path or URL
        #[arg(long)]
        source: Option<String>,
    },
}
