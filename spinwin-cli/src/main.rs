mod commands;
mod config;
mod terminal;

use clap::{Parser, Subcommand};
use spinwin_core::SpinError;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spinwin")]
#[command(about = "Spin the wheel - promotional prize wheel")]
#[command(version)]
struct Cli {
    /// Path to the wheel configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter an email and spin the wheel
    Play(commands::PlayArgs),

    /// Prize catalog commands
    #[command(subcommand)]
    Prizes(commands::PrizeCommands),

    /// Configuration commands
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

async fn run(command: Commands, explicit: Option<&Path>) -> spinwin_core::Result<()> {
    match command {
        Commands::Play(args) => commands::play(args, config::load_config(explicit)?).await,
        Commands::Prizes(cmd) => {
            commands::handle_prize_command(cmd, &config::load_config(explicit)?).await
        }
        Commands::Config(cmd) => commands::handle_config_command(cmd, explicit).await,
    }
}

/// Lines to print for a failed command.
fn error_report(e: &SpinError) -> Vec<String> {
    match e {
        // the terminal notifier has already shown it
        SpinError::InvalidEmail(_) => Vec::new(),
        SpinError::Config(msg) => vec![
            format!("Error: Invalid configuration: {}", msg),
            "Use 'spinwin config show' to inspect the active configuration".to_string(),
        ],
        SpinError::Disposed => vec!["Interrupted".to_string()],
        _ => vec![format!("Error: {}", e)],
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "spinwin={},spinwin_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    let result = run(cli.command, cli.config.as_deref()).await;

    if let Err(e) = result {
        for line in error_report(&e) {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email_reported_once() {
        let error = SpinError::invalid_email("Please enter a valid email address");
        assert!(error_report(&error).is_empty());
    }

    #[test]
    fn test_config_error_points_at_show() {
        let lines = error_report(&SpinError::config("bad url"));
        assert_eq!(lines[0], "Error: Invalid configuration: bad url");
        assert!(lines[1].contains("spinwin config show"));
        assert_eq!(error_report(&SpinError::Disposed), vec!["Interrupted".to_string()]);
    }
}
