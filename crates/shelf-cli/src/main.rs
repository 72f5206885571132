//! Shelf CLI - entrypoint for the file browsing service

mod commands;

use clap::{Parser, Subcommand};
use commands::ServeCommand;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "SHELF_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(ServeCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise run the workspace crates
    // at the selected level with noisy dependencies at warn
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .expect("Invalid RUST_LOG environment variable")
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "shelf_cli={level},\
             shelf_files={level},\
             aws_config=warn,\
             aws_sdk_s3=warn,\
             aws_smithy_runtime=warn,\
             hyper=warn",
            level = cli.log_level
        ))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve(cmd) => cmd.execute(),
    }
}
