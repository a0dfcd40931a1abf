//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::notification::DEFAULT_APP_LABEL;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Label shown as the notification's secondary text by default.
    pub app_label: Option<String>,
    /// Notification backend: "auto", "notify-rust", or "log".
    pub backend: Option<String>,
    /// Determinate progress rendering: "auto", "always", or "never".
    pub progress: Option<String>,
    /// Unix socket the daemon listens on.
    pub socket_path: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_label: Some(DEFAULT_APP_LABEL.to_string()),
            backend: Some("auto".to_string()),
            progress: Some("auto".to_string()),
            socket_path: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_label: other.app_label.or(self.app_label),
            backend: other.backend.or(self.backend),
            progress: other.progress.or(self.progress),
            socket_path: other.socket_path.or(self.socket_path),
        }
    }

    /// Get the app label, or the built-in label if not set
    pub fn app_label_or_default(&self) -> &str {
        self.app_label.as_deref().unwrap_or(DEFAULT_APP_LABEL)
    }

    /// Get backend preference, or "auto" if not set
    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or("auto")
    }

    /// Get progress preference, or "auto" if not set
    pub fn progress_or_default(&self) -> &str {
        self.progress.as_deref().unwrap_or("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.app_label, Some(DEFAULT_APP_LABEL.to_string()));
        assert_eq!(config.backend, Some("auto".to_string()));
        assert_eq!(config.progress, Some("auto".to_string()));
        assert!(config.socket_path.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.app_label.is_none());
        assert!(config.backend.is_none());
        assert!(config.progress.is_none());
        assert!(config.socket_path.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            app_label: Some("Base".to_string()),
            backend: Some("log".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            app_label: Some("Other".to_string()),
            backend: None, // Should not override
            progress: Some("never".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.app_label, Some("Other".to_string()));
        assert_eq!(merged.backend, Some("log".to_string())); // Kept from base
        assert_eq!(merged.progress, Some("never".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            backend: Some("notify-rust".to_string()),
            socket_path: Some("/tmp/capsule.sock".to_string()),
            ..Default::default()
        };

        let other = AppConfig::empty();
        let merged = base.merge(other);

        assert_eq!(merged.backend, Some("notify-rust".to_string()));
        assert_eq!(merged.socket_path, Some("/tmp/capsule.sock".to_string()));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.app_label_or_default(), DEFAULT_APP_LABEL);
        assert_eq!(config.backend_or_default(), "auto");
        assert_eq!(config.progress_or_default(), "auto");
    }

    #[test]
    fn accessors_return_configured_values() {
        let config = AppConfig {
            app_label: Some("Pomodoro".to_string()),
            backend: Some("log".to_string()),
            progress: Some("always".to_string()),
            ..Default::default()
        };
        assert_eq!(config.app_label_or_default(), "Pomodoro");
        assert_eq!(config.backend_or_default(), "log");
        assert_eq!(config.progress_or_default(), "always");
    }
}
