//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the main application runners.

pub mod app;
pub mod args;
pub mod bridge;
pub mod call_cmd;
pub mod config_cmd;
pub mod pid_file;
pub mod presenter;
pub mod serve;
pub mod signals;

// Re-export commonly used types
pub use app::{run_cancel, run_update, EXIT_ERROR, EXIT_SUCCESS, EXIT_UNSUPPORTED, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ServeOptions, UpdateOptions};
pub use call_cmd::handle_call_command;
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
pub use serve::run_serve;
