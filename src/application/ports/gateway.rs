//! Notification gateway port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::{ChannelSpec, NotificationContent};

/// Gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Notification service unavailable: {0}")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// What the active backend can actually render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayCapabilities {
    /// Backend renders a determinate progress indicator.
    pub determinate_progress: bool,
}

/// Port for the OS notification subsystem
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Create or replace a notification channel.
    async fn create_channel(&self, spec: &ChannelSpec) -> Result<(), GatewayError>;

    /// Delete a notification channel.
    ///
    /// # Returns
    /// Ok(()) even when the channel does not exist
    async fn delete_channel(&self, channel_id: &str) -> Result<(), GatewayError>;

    /// Post a notification, replacing any previous one with the same id.
    async fn post(&self, id: u32, content: &NotificationContent) -> Result<(), GatewayError>;

    /// Remove the notification with the given id. No-op if nothing is shown.
    async fn cancel(&self, id: u32) -> Result<(), GatewayError>;

    /// Rendering capabilities, fixed for the gateway's lifetime.
    fn capabilities(&self) -> GatewayCapabilities;
}

/// Blanket implementation for boxed gateway types
#[async_trait]
impl NotificationGateway for Box<dyn NotificationGateway> {
    async fn create_channel(&self, spec: &ChannelSpec) -> Result<(), GatewayError> {
        self.as_ref().create_channel(spec).await
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<(), GatewayError> {
        self.as_ref().delete_channel(channel_id).await
    }

    async fn post(&self, id: u32, content: &NotificationContent) -> Result<(), GatewayError> {
        self.as_ref().post(id, content).await
    }

    async fn cancel(&self, id: u32) -> Result<(), GatewayError> {
        self.as_ref().cancel(id).await
    }

    fn capabilities(&self) -> GatewayCapabilities {
        self.as_ref().capabilities()
    }
}
