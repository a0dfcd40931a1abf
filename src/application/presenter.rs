//! Timer notification presenter use case
//!
//! Owns the singleton timer notification: channel setup, replacement posts,
//! and removal. The presenter never surfaces gateway failures to its caller;
//! a notification that cannot be shown must not take the timer down with it.

use crate::domain::notification::{
    build_timer_content, ChannelSpec, LEGACY_TIMER_CHANNEL_ID, TIMER_NOTIFICATION_ID,
};
use crate::domain::timer::{now_epoch_ms, TimerUpdate};

use super::ports::NotificationGateway;

/// Presenter for the singleton timer notification
pub struct NotificationPresenter<G: NotificationGateway> {
    gateway: G,
}

impl<G: NotificationGateway> NotificationPresenter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Idempotent channel setup.
    ///
    /// Creates the current timer channel and deletes the previous
    /// generation so stale settings entries do not accumulate. Both calls
    /// are best-effort; a channel that already exists or a legacy channel
    /// that was never created are not errors.
    pub async fn ensure_channel(&self) {
        let _ = self.gateway.create_channel(&ChannelSpec::timer()).await;
        let _ = self.gateway.delete_channel(LEGACY_TIMER_CHANNEL_ID).await;
    }

    /// Build and (re)issue the timer notification for `req`.
    ///
    /// Posting under the fixed id replaces whatever was shown before, so
    /// every call is a full-state update rather than a patch.
    pub async fn update(&self, req: &TimerUpdate) {
        let supports_progress = self.gateway.capabilities().determinate_progress;
        let content = build_timer_content(req, now_epoch_ms(), supports_progress);
        let _ = self.gateway.post(TIMER_NOTIFICATION_ID, &content).await;
    }

    /// Remove the timer notification. No-op if nothing is currently shown.
    pub async fn cancel(&self) {
        let _ = self.gateway.cancel(TIMER_NOTIFICATION_ID).await;
    }
}
