//! Notification channel identity and registration attributes
//!
//! The timer notification lives on a dedicated silent channel. Channel
//! attributes are frozen at registration by the platform, so a behavior
//! change requires a new channel id; the previous generation is deleted
//! on startup to keep settings screens clean.

/// Channel carrying the timer notification.
pub const TIMER_CHANNEL_ID: &str = "focus_capsule_timer_v2";

/// First-generation channel, superseded by [`TIMER_CHANNEL_ID`].
pub const LEGACY_TIMER_CHANNEL_ID: &str = "focus_capsule_timer";

/// Fixed id of the singleton timer notification. Posting with the same id
/// replaces the previous notification in place.
pub const TIMER_NOTIFICATION_ID: u32 = 1000;

/// Label shown when a request carries no secondary text of its own.
pub const DEFAULT_APP_LABEL: &str = "FocusCapsule";

/// Relative prominence of a channel's notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Low,
    Default,
    High,
}

/// Everything a backend needs to register a notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: Importance,
    pub show_badge: bool,
    pub vibration: bool,
    /// Silent channels never play a sound, even at high importance.
    pub silent: bool,
}

impl ChannelSpec {
    /// The timer channel: maximum prominence, zero interruption.
    pub const fn timer() -> Self {
        Self {
            id: TIMER_CHANNEL_ID,
            name: "Focus Timer",
            description: "Focus timer countdown on the status area and lock screen",
            importance: Importance::High,
            show_badge: false,
            vibration: false,
            silent: true,
        }
    }
}
