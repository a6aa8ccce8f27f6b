use crate::config::{load_config, resolve_path};
use clap::Subcommand;
use spinwin_core::{Result, SpinError, WheelConfig};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
}

pub async fn handle_config_command(cmd: ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            let path = resolve_path(explicit);
            if path.exists() && !force {
                return Err(SpinError::config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            WheelConfig::default().save(&path)?;
            println!("Wrote default configuration to {}", path.display());
            println!("Set collector.url to start forwarding results.");
        }

        ConfigCommands::Show => {
            let config = load_config(explicit)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        ConfigCommands::Path => {
            println!("{}", resolve_path(explicit).display());
        }
    }

    Ok(())
}
