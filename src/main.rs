//! FocusCapsule CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use focus_capsule::application::DispatchOutcome;
use focus_capsule::cli::{
    app::{load_merged_config, run_cancel, run_update},
    args::{Cli, Commands},
    call_cmd::handle_call_command,
    config_cmd::handle_config_command,
    presenter::Presenter,
    serve::run_serve,
    ServeOptions, UpdateOptions, EXIT_ERROR, EXIT_SUCCESS, EXIT_UNSUPPORTED, EXIT_USAGE_ERROR,
};
use focus_capsule::domain::config::AppConfig;
use focus_capsule::domain::timer::{now_epoch_ms, Duration, TimerUpdate};
use focus_capsule::infrastructure::notification::{BackendPreference, ProgressPreference};
use focus_capsule::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Config management bypasses backend resolution entirely, so a broken
    // config value can always be repaired with `config set`.
    let command = match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::from(EXIT_SUCCESS);
        }
        command => command,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        app_label: None, // the label comes from the config file only
        backend: cli.backend.clone(),
        progress: cli.progress.clone(),
        socket_path: None, // the socket override comes from the config file only
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    match command {
        Commands::Update {
            title,
            text,
            sub_text,
            end_at,
            end_in,
            start_at,
            running_for,
            count_up,
            paused,
        } => {
            let (backend, progress) = match resolve_preferences(&config, &presenter) {
                Ok(prefs) => prefs,
                Err(code) => return code,
            };

            let now_ms = now_epoch_ms();

            let end_time_ms = match (end_at, end_in.as_deref()) {
                (Some(ms), _) => Some(ms),
                (None, Some(span)) => match span.parse::<Duration>() {
                    Ok(d) => Some(now_ms.saturating_add(clamp_to_i64(d.as_millis()))),
                    Err(e) => {
                        presenter.error(&format!("Invalid --end-in: {}", e));
                        return ExitCode::from(EXIT_USAGE_ERROR);
                    }
                },
                (None, None) => None,
            };

            let start_time_ms = match (start_at, running_for.as_deref()) {
                (Some(ms), _) => Some(ms),
                (None, Some(span)) => match span.parse::<Duration>() {
                    Ok(d) => Some(now_ms.saturating_sub(clamp_to_i64(d.as_millis()))),
                    Err(e) => {
                        presenter.error(&format!("Invalid --running-for: {}", e));
                        return ExitCode::from(EXIT_USAGE_ERROR);
                    }
                },
                (None, None) => None,
            };

            let request = TimerUpdate {
                title,
                text,
                sub_text: sub_text.unwrap_or_else(|| config.app_label_or_default().to_string()),
                end_time_ms,
                start_time_ms,
                countdown: !count_up,
                paused,
            };

            run_update(UpdateOptions {
                request,
                backend,
                progress,
            })
            .await
        }
        Commands::Cancel => {
            let (backend, progress) = match resolve_preferences(&config, &presenter) {
                Ok(prefs) => prefs,
                Err(code) => return code,
            };

            run_cancel(backend, progress).await
        }
        Commands::Serve => {
            let (backend, progress) = match resolve_preferences(&config, &presenter) {
                Ok(prefs) => prefs,
                Err(code) => return code,
            };

            run_serve(ServeOptions {
                backend,
                progress,
                socket_path: config.socket_path.clone().map(PathBuf::from),
            })
            .await
        }
        Commands::Call { command, args } => {
            let socket_path = config.socket_path.clone().map(PathBuf::from);

            match handle_call_command(&command, &args, socket_path, &presenter).await {
                Ok(DispatchOutcome::Success) => ExitCode::from(EXIT_SUCCESS),
                Ok(DispatchOutcome::NotImplemented) => ExitCode::from(EXIT_UNSUPPORTED),
                Err(e) => {
                    presenter.error(&e);
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

/// Clamp a millisecond span to what an epoch timestamp can hold.
fn clamp_to_i64(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

/// Parse backend and progress preferences out of the merged config.
fn resolve_preferences(
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(BackendPreference, ProgressPreference), ExitCode> {
    let backend = config
        .backend_or_default()
        .parse::<BackendPreference>()
        .map_err(|e| {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_USAGE_ERROR)
        })?;

    let progress = config
        .progress_or_default()
        .parse::<ProgressPreference>()
        .map_err(|e| {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_USAGE_ERROR)
        })?;

    Ok((backend, progress))
}
