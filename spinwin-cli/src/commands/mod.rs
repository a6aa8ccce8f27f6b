pub mod config;
pub mod play;
pub mod prizes;

pub use config::{handle_config_command, ConfigCommands};
pub use play::{play, PlayArgs};
pub use prizes::{handle_prize_command, PrizeCommands};
