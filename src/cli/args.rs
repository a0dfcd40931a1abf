//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::timer::TimerUpdate;
use crate::infrastructure::notification::{BackendPreference, ProgressPreference};

/// FocusCapsule - focus-timer capsule notifications
#[derive(Parser, Debug)]
#[command(name = "focus-capsule")]
#[command(version = "0.3.0")]
#[command(about = "Focus-timer capsule notifications for the desktop status area")]
#[command(long_about = None)]
pub struct Cli {
    /// Notification backend (auto, notify-rust, log)
    #[arg(long, value_name = "BACKEND", env = "FOCUS_CAPSULE_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Determinate progress rendering (auto, always, never)
    #[arg(long, value_name = "MODE", env = "FOCUS_CAPSULE_PROGRESS", global = true)]
    pub progress: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or replace the timer notification
    Update {
        /// Notification headline
        #[arg(long, value_name = "TEXT", default_value = "")]
        title: String,

        /// Notification body text
        #[arg(long, value_name = "TEXT", default_value = "")]
        text: String,

        /// Secondary label (defaults to the configured app label)
        #[arg(long, value_name = "TEXT")]
        sub_text: Option<String>,

        /// Timer end as milliseconds since the Unix epoch
        #[arg(long, value_name = "MS", conflicts_with = "end_in")]
        end_at: Option<i64>,

        /// Timer end as a duration from now (e.g., 25m, 90s, 2m30s)
        #[arg(long, value_name = "TIME")]
        end_in: Option<String>,

        /// Timer start as milliseconds since the Unix epoch
        #[arg(long, value_name = "MS", conflicts_with = "running_for")]
        start_at: Option<i64>,

        /// Timer start as a duration before now (e.g., 5m)
        #[arg(long, value_name = "TIME")]
        running_for: Option<String>,

        /// Count up from the start time instead of down to the end time
        #[arg(long)]
        count_up: bool,

        /// Freeze the timer display at the static text
        #[arg(long)]
        paused: bool,
    },
    /// Remove the timer notification
    Cancel,
    /// Run the notification daemon
    Serve,
    /// Send a raw command to the running daemon
    Call {
        /// Command name (e.g., update-timer-notification)
        command: String,

        /// Named arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed update options (one-shot mode)
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub request: TimerUpdate,
    pub backend: BackendPreference,
    pub progress: ProgressPreference,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub backend: BackendPreference,
    pub progress: ProgressPreference,
    pub socket_path: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["app_label", "backend", "progress", "socket_path"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
