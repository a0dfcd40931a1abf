//! Main app runners for one-shot mode

use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::{
    CommandDispatcher, DispatchOutcome, NotificationPresenter, CMD_CANCEL, CMD_UPDATE,
};
use crate::domain::config::AppConfig;
use crate::infrastructure::notification::{
    create_gateway, BackendPreference, NotificationBackend, ProgressPreference,
};
use crate::infrastructure::XdgConfigStore;

use super::args::UpdateOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
/// The daemon understood the request but does not support the command.
pub const EXIT_UNSUPPORTED: u8 = 3;

/// Run a one-shot timer update
pub async fn run_update(options: UpdateOptions) -> ExitCode {
    let presenter = Presenter::new();

    let (gateway, backend) = create_gateway(options.backend, options.progress).await;
    if options.backend == BackendPreference::Auto && backend == NotificationBackend::Log {
        presenter.warn("No notification server found; writing to stderr");
    }

    let dispatcher = CommandDispatcher::new(NotificationPresenter::new(gateway));

    // Fresh process, fresh engine: the channel must exist before posting.
    dispatcher.presenter().ensure_channel().await;

    // Route through the command surface so one-shot mode and the daemon
    // share one code path.
    let args = options.request.to_args();
    match dispatcher.handle(CMD_UPDATE, &args).await {
        DispatchOutcome::Success => {
            presenter.success("Timer notification updated");
            ExitCode::from(EXIT_SUCCESS)
        }
        DispatchOutcome::NotImplemented => {
            presenter.error("Update command is not available");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run a one-shot cancel
pub async fn run_cancel(backend: BackendPreference, progress: ProgressPreference) -> ExitCode {
    let presenter = Presenter::new();

    let (gateway, _backend) = create_gateway(backend, progress).await;
    let dispatcher = CommandDispatcher::new(NotificationPresenter::new(gateway));

    match dispatcher.handle(CMD_CANCEL, &serde_json::Map::new()).await {
        DispatchOutcome::Success => {
            presenter.success("Timer notification cancelled");
            ExitCode::from(EXIT_SUCCESS)
        }
        DispatchOutcome::NotImplemented => {
            presenter.error("Cancel command is not available");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file and CLI.
///
/// Merge order: defaults < file < cli. Environment overrides arrive through
/// clap's env attributes, so they land in the cli layer.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    AppConfig::defaults().merge(file_config).merge(cli_config)
}
