//! Log-only notification adapter
//!
//! Used on headless systems or when no notification server answers: every
//! operation succeeds and leaves one line on stderr so the timer state
//! stays observable.

use async_trait::async_trait;

use crate::application::ports::{GatewayCapabilities, GatewayError, NotificationGateway};
use crate::domain::notification::{ChannelSpec, ChronometerMode, NotificationContent};

/// Gateway that writes notifications to stderr instead of the desktop
pub struct LogGateway {
    capabilities: GatewayCapabilities,
}

impl LogGateway {
    /// Create a gateway with pre-resolved capabilities.
    pub fn new(capabilities: GatewayCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for LogGateway {
    fn default() -> Self {
        // Text output can represent everything, progress included.
        Self::new(GatewayCapabilities {
            determinate_progress: true,
        })
    }
}

#[async_trait]
impl NotificationGateway for LogGateway {
    async fn create_channel(&self, spec: &ChannelSpec) -> Result<(), GatewayError> {
        eprintln!("[notification] channel ready: {}", spec.id);
        Ok(())
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<(), GatewayError> {
        eprintln!("[notification] channel removed: {}", channel_id);
        Ok(())
    }

    async fn post(&self, id: u32, content: &NotificationContent) -> Result<(), GatewayError> {
        eprintln!("[notification] #{} {}", id, describe(content));
        Ok(())
    }

    async fn cancel(&self, id: u32) -> Result<(), GatewayError> {
        eprintln!("[notification] #{} cancelled", id);
        Ok(())
    }

    fn capabilities(&self) -> GatewayCapabilities {
        self.capabilities
    }
}

/// One-line summary of the rendered notification.
fn describe(content: &NotificationContent) -> String {
    let mut parts = vec![format!("title={:?}", content.title)];
    if !content.text.is_empty() {
        parts.push(format!("text={:?}", content.text));
    }
    parts.push(format!("via={:?}", content.sub_text));
    match content.chronometer {
        Some(ChronometerMode::CountDown) => parts.push("countdown".to_string()),
        Some(ChronometerMode::CountUp) => parts.push("count-up".to_string()),
        None => parts.push("static".to_string()),
    }
    if let Some(when) = content.when_ms {
        parts.push(format!("when={}", when));
    }
    if let Some(percent) = content.progress_percent {
        parts.push(format!("progress={}%", percent));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::build_timer_content;
    use crate::domain::timer::TimerUpdate;

    fn content(req: &TimerUpdate) -> NotificationContent {
        build_timer_content(req, 500_000, true)
    }

    #[tokio::test]
    async fn all_operations_succeed() {
        let gateway = LogGateway::default();
        assert!(gateway.create_channel(&ChannelSpec::timer()).await.is_ok());
        assert!(gateway.delete_channel("old").await.is_ok());
        assert!(gateway.post(1, &content(&TimerUpdate::default())).await.is_ok());
        assert!(gateway.cancel(1).await.is_ok());
    }

    #[test]
    fn default_supports_progress() {
        assert!(LogGateway::default().capabilities().determinate_progress);
    }

    #[test]
    fn describe_running_countdown() {
        let req = TimerUpdate {
            title: "Focus".to_string(),
            text: "Deep work".to_string(),
            end_time_ms: Some(1_000_000),
            start_time_ms: Some(0),
            ..TimerUpdate::default()
        };
        let line = describe(&content(&req));
        assert!(line.contains("title=\"Focus\""));
        assert!(line.contains("countdown"));
        assert!(line.contains("when=1000000"));
        assert!(line.contains("progress=50%"));
    }

    #[test]
    fn describe_paused_is_static() {
        let req = TimerUpdate {
            title: "Focus".to_string(),
            paused: true,
            ..TimerUpdate::default()
        };
        let line = describe(&content(&req));
        assert!(line.contains("static"));
        assert!(!line.contains("when="));
        assert!(!line.contains("progress="));
    }
}
