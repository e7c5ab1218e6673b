use clap::Subcommand;
use studyflow_core::storage::Config;

use crate::common::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show {
        /// Emit JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Set the default focus duration in minutes
    SetFocus {
        /// Minutes assumed for tasks without a duration
        minutes: u32,
    },
    /// Set the recommendation refresh cadence in seconds
    SetRefresh {
        /// Seconds between refreshes
        secs: u64,
    },
    /// Enable or disable session reminders
    SetNotifications {
        /// true or false
        enabled: bool,
    },
    /// Restore defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Show { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::SetFocus { minutes } => {
            let mut config = Config::load()?;
            config.timer.default_focus_minutes = minutes;
            config.save()?;
            println!("default_focus_minutes = {minutes}");
        }
        ConfigAction::SetRefresh { secs } => {
            if secs == 0 {
                return Err("refresh_secs must be at least 1".into());
            }
            let mut config = Config::load()?;
            config.recommendation.refresh_secs = secs;
            config.save()?;
            println!("refresh_secs = {secs}");
        }
        ConfigAction::SetNotifications { enabled } => {
            let mut config = Config::load()?;
            config.notifications.enabled = enabled;
            config.save()?;
            println!("notifications.enabled = {enabled}");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}
