use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stash-vr")]
#[command(author, version, about = "Serves Stash scenes to VR video players")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the video data server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Stash GraphQL endpoint (overrides config)
        #[arg(long, env = "STASH_GRAPHQL_URL")]
        stash_url: Option<String>,

        /// Stash API key (overrides config)
        #[arg(long, env = "STASH_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Print the projection inferred from a video path
    Inspect {
        /// File path or url as stored in the catalog
        #[arg(required = true)]
        path: String,
    },

    /// Display version information
    Version,
}
