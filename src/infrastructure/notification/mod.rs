//! Notification infrastructure module
//!
//! Provides the desktop gateway (notify-rust) with automatic fallback to a
//! log-only gateway on headless systems.

mod log_only;
#[cfg(target_os = "linux")]
mod notify_rust;

pub use log_only::LogGateway;
#[cfg(target_os = "linux")]
pub use notify_rust::NotifyRustGateway;

use std::fmt;
use std::str::FromStr;

use crate::application::ports::{GatewayCapabilities, NotificationGateway};

/// Gateway actually selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationBackend {
    /// Desktop notifications over the session bus
    NotifyRust,
    /// stderr lines only
    Log,
}

impl fmt::Display for NotificationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationBackend::NotifyRust => write!(f, "notify-rust"),
            NotificationBackend::Log => write!(f, "log"),
        }
    }
}

/// User preference for gateway selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Probe the session bus; fall back to log output
    #[default]
    Auto,
    /// Force desktop notifications
    NotifyRust,
    /// Force log output
    Log,
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendPreference::Auto => write!(f, "auto"),
            BackendPreference::NotifyRust => write!(f, "notify-rust"),
            BackendPreference::Log => write!(f, "log"),
        }
    }
}

/// Error type for parsing a backend preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError {
    pub value: String,
}

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid backend '{}'. Valid options: auto, notify-rust, log",
            self.value
        )
    }
}

impl std::error::Error for ParseBackendError {}

impl FromStr for BackendPreference {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(BackendPreference::Auto),
            "notify-rust" | "notify_rust" | "desktop" => Ok(BackendPreference::NotifyRust),
            "log" => Ok(BackendPreference::Log),
            _ => Err(ParseBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// User preference for determinate progress rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressPreference {
    /// Let the server probe decide
    #[default]
    Auto,
    /// Attach progress regardless of the probe
    Always,
    /// Never attach progress
    Never,
}

impl fmt::Display for ProgressPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressPreference::Auto => write!(f, "auto"),
            ProgressPreference::Always => write!(f, "always"),
            ProgressPreference::Never => write!(f, "never"),
        }
    }
}

/// Error type for parsing a progress preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProgressError {
    pub value: String,
}

impl fmt::Display for ParseProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid progress mode '{}'. Valid options: auto, always, never",
            self.value
        )
    }
}

impl std::error::Error for ParseProgressError {}

impl FromStr for ProgressPreference {
    type Err = ParseProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ProgressPreference::Auto),
            "always" => Ok(ProgressPreference::Always),
            "never" => Ok(ProgressPreference::Never),
            _ => Err(ParseProgressError {
                value: s.to_string(),
            }),
        }
    }
}

const fn resolve_progress(preference: ProgressPreference, server_supports: bool) -> bool {
    match preference {
        ProgressPreference::Auto => server_supports,
        ProgressPreference::Always => true,
        ProgressPreference::Never => false,
    }
}

/// Servers known to render the standard `value` hint as a progress bar.
#[cfg(target_os = "linux")]
fn server_renders_progress(name: &str, vendor: &str) -> bool {
    let name = name.to_lowercase();
    let vendor = vendor.to_lowercase();
    name.contains("plasma")
        || name.contains("dunst")
        || name.contains("xfce")
        || vendor.contains("kde")
        || vendor.contains("xfce")
}

/// Ask the session bus which notification server is running, if any.
///
/// Yields the server's advertised name and vendor.
#[cfg(target_os = "linux")]
async fn probe_server_identity() -> Option<(String, String)> {
    // The probe is a blocking bus call, so run in spawn_blocking
    tokio::task::spawn_blocking(|| {
        ::notify_rust::get_server_information()
            .ok()
            .map(|info| (info.name, info.vendor))
    })
    .await
    .ok()
    .flatten()
}

/// Create a notification gateway using the specified preferences.
///
/// Returns the gateway and the backend that was selected.
///
/// On non-Linux platforms, always uses the log gateway regardless of
/// preference.
pub async fn create_gateway(
    backend: BackendPreference,
    progress: ProgressPreference,
) -> (Box<dyn NotificationGateway>, NotificationBackend) {
    #[cfg(not(target_os = "linux"))]
    {
        let _ = backend;
        (log_gateway(progress), NotificationBackend::Log)
    }

    #[cfg(target_os = "linux")]
    {
        match backend {
            BackendPreference::Log => (log_gateway(progress), NotificationBackend::Log),
            BackendPreference::NotifyRust => {
                let server_supports = probe_server_identity()
                    .await
                    .map(|(name, vendor)| server_renders_progress(&name, &vendor))
                    .unwrap_or(false);
                (
                    desktop_gateway(progress, server_supports),
                    NotificationBackend::NotifyRust,
                )
            }
            BackendPreference::Auto => match probe_server_identity().await {
                Some((name, vendor)) => {
                    let server_supports = server_renders_progress(&name, &vendor);
                    (
                        desktop_gateway(progress, server_supports),
                        NotificationBackend::NotifyRust,
                    )
                }
                // No server answered; keep the timer observable on stderr.
                None => (log_gateway(progress), NotificationBackend::Log),
            },
        }
    }
}

fn log_gateway(progress: ProgressPreference) -> Box<dyn NotificationGateway> {
    // Text output can represent progress, so only an explicit "never" drops it.
    Box::new(LogGateway::new(GatewayCapabilities {
        determinate_progress: resolve_progress(progress, true),
    }))
}

#[cfg(target_os = "linux")]
fn desktop_gateway(
    progress: ProgressPreference,
    server_supports: bool,
) -> Box<dyn NotificationGateway> {
    Box::new(NotifyRustGateway::new(GatewayCapabilities {
        determinate_progress: resolve_progress(progress, server_supports),
    }))
}
