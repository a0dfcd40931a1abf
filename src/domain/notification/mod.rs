//! Notification domain module

mod channel;
mod content;

pub use channel::{
    ChannelSpec, Importance, DEFAULT_APP_LABEL, LEGACY_TIMER_CHANNEL_ID, TIMER_CHANNEL_ID,
    TIMER_NOTIFICATION_ID,
};
pub use content::{build_timer_content, ChronometerMode, NotificationContent};
