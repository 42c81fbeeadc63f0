mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dealscan-cli")]
#[command(about = "Classify extracted catalogue listings into a deal sheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify extracted listings and write the deal sheet as JSON
    Classify {
        /// Extracted listings JSON (defaults to `DEALSCAN_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output path (defaults to `DEALSCAN_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Classify extracted listings and write the report payload as JSON
    Report {
        /// Extracted listings JSON (defaults to `DEALSCAN_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output path (defaults to `DEALSCAN_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = dealscan_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Classify { input, output }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            commands::run_classify(&input, &output).await?;
        }
        Some(Commands::Report { input, output }) => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            commands::run_report(&config, &input, &output).await?;
        }
        None => println!("dealscan-cli: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
