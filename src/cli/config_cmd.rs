//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::infrastructure::{BackendPreference, ProgressPreference};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "app_label" => config.app_label = Some(value.to_string()),
        "backend" => config.backend = Some(value.to_string()),
        "progress" => config.progress = Some(value.to_string()),
        "socket_path" => config.socket_path = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "app_label" => config.app_label,
        "backend" => config.backend,
        "progress" => config.progress,
        "socket_path" => config.socket_path,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "app_label",
        config.app_label.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value("backend", config.backend.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "progress",
        config.progress.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "socket_path",
        config.socket_path.as_deref().unwrap_or("(not set)"),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "backend" => {
            value
                .parse::<BackendPreference>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "progress" => {
            value
                .parse::<ProgressPreference>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        _ => {} // app_label and socket_path accept any string
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_backend_valid() {
        assert!(validate_config_value("backend", "auto").is_ok());
        assert!(validate_config_value("backend", "notify-rust").is_ok());
        assert!(validate_config_value("backend", "log").is_ok());
    }

    #[test]
    fn validate_backend_invalid() {
        assert!(validate_config_value("backend", "dbus").is_err());
    }

    #[test]
    fn validate_progress_valid() {
        assert!(validate_config_value("progress", "auto").is_ok());
        assert!(validate_config_value("progress", "always").is_ok());
        assert!(validate_config_value("progress", "never").is_ok());
    }

    #[test]
    fn validate_progress_invalid() {
        assert!(validate_config_value("progress", "sometimes").is_err());
    }

    #[test]
    fn validate_free_form_keys() {
        assert!(validate_config_value("app_label", "Any Label At All").is_ok());
        assert!(validate_config_value("socket_path", "/run/user/1000/fc.sock").is_ok());
    }
}
