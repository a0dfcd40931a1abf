//! Domain layer - Core business logic
//!
//! Contains value objects, the notification content policy, and domain
//! errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod timer;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{
    build_timer_content, ChannelSpec, ChronometerMode, Importance, NotificationContent,
    DEFAULT_APP_LABEL, LEGACY_TIMER_CHANNEL_ID, TIMER_CHANNEL_ID, TIMER_NOTIFICATION_ID,
};
pub use timer::{format_clock_span, now_epoch_ms, progress_percent, Duration, TimerUpdate};
