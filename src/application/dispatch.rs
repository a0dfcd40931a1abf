//! Command dispatch use case
//!
//! Maps named commands with loosely-typed arguments onto presenter
//! operations. The command set is closed: anything unrecognized yields
//! [`DispatchOutcome::NotImplemented`] so callers can distinguish "this
//! build does not know that command" from success and from failure.

use serde_json::{Map, Value};

use crate::domain::timer::TimerUpdate;

use super::ports::NotificationGateway;
use super::presenter::NotificationPresenter;

/// Replace the singleton timer notification.
pub const CMD_UPDATE: &str = "update-timer-notification";
/// Remove the singleton timer notification.
pub const CMD_CANCEL: &str = "cancel-timer-notification";

/// Result of dispatching one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Command recognized and handled; there is no payload to return.
    Success,
    /// Command name is not part of the supported set.
    NotImplemented,
}

/// Dispatcher over the closed timer-notification command set
pub struct CommandDispatcher<G: NotificationGateway> {
    presenter: NotificationPresenter<G>,
}

impl<G: NotificationGateway> CommandDispatcher<G> {
    pub fn new(presenter: NotificationPresenter<G>) -> Self {
        Self { presenter }
    }

    /// Handle one command to completion, side effects included.
    ///
    /// Argument decoding is total: missing or wrong-typed entries fall back
    /// to their defaults, so a recognized command always reaches the
    /// presenter.
    pub async fn handle(&self, command: &str, args: &Map<String, Value>) -> DispatchOutcome {
        match command {
            CMD_UPDATE => {
                let request = TimerUpdate::from_args(args);
                self.presenter.update(&request).await;
                DispatchOutcome::Success
            }
            CMD_CANCEL => {
                self.presenter.cancel().await;
                DispatchOutcome::Success
            }
            _ => DispatchOutcome::NotImplemented,
        }
    }

    pub fn presenter(&self) -> &NotificationPresenter<G> {
        &self.presenter
    }
}
