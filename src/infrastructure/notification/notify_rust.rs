//! Freedesktop notification adapter using notify-rust
//!
//! Maps channel attributes and the timer content model onto the
//! freedesktop notification surface. The desktop has no OS-rendered
//! chronometer, so the live timer line becomes a snapshot computed at post
//! time; each replacement refreshes it.

use async_trait::async_trait;
use notify_rust::{Hint, Timeout, Urgency};
use std::sync::Mutex;

use crate::application::ports::{GatewayCapabilities, GatewayError, NotificationGateway};
use crate::domain::notification::{
    ChannelSpec, ChronometerMode, Importance, NotificationContent, DEFAULT_APP_LABEL,
};
use crate::domain::timer::{format_clock_span, now_epoch_ms};

/// Freedesktop status icon shown next to the notification.
const TIMER_ICON: &str = "appointment-soon";

/// Freedesktop gateway using notify-rust
pub struct NotifyRustGateway {
    /// Attributes remembered from channel registration. Freedesktop has no
    /// channel registry, so they are applied to every post instead.
    channel: Mutex<Option<ChannelSpec>>,
    capabilities: GatewayCapabilities,
}

impl NotifyRustGateway {
    /// Create a gateway with pre-resolved capabilities.
    pub fn new(capabilities: GatewayCapabilities) -> Self {
        Self {
            channel: Mutex::new(None),
            capabilities,
        }
    }
}

#[async_trait]
impl NotificationGateway for NotifyRustGateway {
    async fn create_channel(&self, spec: &ChannelSpec) -> Result<(), GatewayError> {
        if let Ok(mut guard) = self.channel.lock() {
            *guard = Some(spec.clone());
        }
        Ok(())
    }

    async fn delete_channel(&self, _channel_id: &str) -> Result<(), GatewayError> {
        // Nothing to delete without a channel registry.
        Ok(())
    }

    async fn post(&self, id: u32, content: &NotificationContent) -> Result<(), GatewayError> {
        let channel = self.channel.lock().ok().and_then(|guard| guard.clone());
        let content = content.clone();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            build_notification(id, &content, channel.as_ref(), now_epoch_ms())
                .show()
                .map(|_| ())
                .map_err(|e| GatewayError::Backend(e.to_string()))
        })
        .await
        .map_err(|e| GatewayError::Backend(format!("Task join error: {}", e)))?
    }

    async fn cancel(&self, id: u32) -> Result<(), GatewayError> {
        // No handle survives across posts or processes, so removal replaces
        // the id with a transient tombstone that expires almost immediately.
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(DEFAULT_APP_LABEL)
                .summary(DEFAULT_APP_LABEL)
                .id(id)
                .urgency(Urgency::Low)
                .hint(Hint::Transient(true))
                .hint(Hint::SuppressSound(true))
                .timeout(Timeout::Milliseconds(1))
                .show()
                .map(|_| ())
                .map_err(|e| GatewayError::Backend(e.to_string()))
        })
        .await
        .map_err(|e| GatewayError::Backend(format!("Task join error: {}", e)))?
    }

    fn capabilities(&self) -> GatewayCapabilities {
        self.capabilities
    }
}

/// Assemble the wire notification for one post.
fn build_notification(
    id: u32,
    content: &NotificationContent,
    channel: Option<&ChannelSpec>,
    now_ms: i64,
) -> notify_rust::Notification {
    let mut notification = notify_rust::Notification::new();
    notification
        .appname(&content.sub_text)
        .summary(&content.title)
        .body(&compose_body(content, now_ms))
        .icon(TIMER_ICON)
        .id(id);

    if let Some(spec) = channel {
        notification.urgency(urgency_for(spec.importance));
        if spec.silent {
            notification.hint(Hint::SuppressSound(true));
        }
    }

    if content.ongoing {
        notification.hint(Hint::Resident(true));
        notification.timeout(Timeout::Never);
    }

    // Body taps fire the conventional "default" action.
    if content.resume_app_on_tap {
        notification.action("default", "Open");
    }

    if let Some(percent) = content.progress_percent {
        notification.hint(Hint::CustomInt("value".to_owned(), i32::from(percent)));
    }

    notification
}

/// Body text plus a timer snapshot line when the chronometer is active and
/// has a basis timestamp. Paused content carries no timer line.
fn compose_body(content: &NotificationContent, now_ms: i64) -> String {
    let timer_line = match (content.chronometer, content.when_ms) {
        (Some(ChronometerMode::CountDown), Some(end)) => Some(format!(
            "{} remaining",
            format_clock_span(end.saturating_sub(now_ms))
        )),
        (Some(ChronometerMode::CountUp), Some(start)) => Some(format!(
            "{} elapsed",
            format_clock_span(now_ms.saturating_sub(start))
        )),
        _ => None,
    };

    match timer_line {
        Some(line) if content.text.is_empty() => line,
        Some(line) => format!("{}\n{}", content.text, line),
        None => content.text.clone(),
    }
}

const fn urgency_for(importance: Importance) -> Urgency {
    match importance {
        Importance::Low => Urgency::Low,
        Importance::Default => Urgency::Normal,
        Importance::High => Urgency::Critical,
    }
}
