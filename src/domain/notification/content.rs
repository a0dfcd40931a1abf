//! Timer notification content policy
//!
//! [`build_timer_content`] is the single place that decides what the
//! notification looks like for a given request. It is a pure function of the
//! request, the current time, and whether the backend can render determinate
//! progress, which keeps the policy testable without any notification daemon.

use crate::domain::timer::{progress_percent, TimerUpdate};

/// Direction of the live timer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChronometerMode {
    /// Time remaining until the end timestamp.
    CountDown,
    /// Time elapsed since the start timestamp.
    CountUp,
}

/// Backend-agnostic description of the rendered timer notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    pub title: String,
    pub text: String,
    pub sub_text: String,
    /// Live timer line; absent while paused.
    pub chronometer: Option<ChronometerMode>,
    /// Basis timestamp of the timer line, ms since the Unix epoch. Absent
    /// when paused or when the request omitted the relevant timestamp.
    pub when_ms: Option<i64>,
    /// Determinate progress, 0..=100; attached only when it can be computed.
    pub progress_percent: Option<u8>,
    /// Not dismissable by swipe.
    pub ongoing: bool,
    /// Sound/vibration happen at most once across replacements.
    pub only_alert_once: bool,
    /// Show the basis timestamp area.
    pub show_when: bool,
    /// Full content on the lock screen.
    pub public_on_lock_screen: bool,
    /// Tapping resumes the host application instead of spawning a new one.
    pub resume_app_on_tap: bool,
}

/// Build the singleton timer notification for `req` as of `now_ms`.
///
/// Pausing disables the live timer line so the static `text` carries the
/// state; the platform timer widget has no pause affordance of its own.
/// Progress is attached only when every precondition holds (backend
/// support, running countdown, both timestamps, positive window) and is
/// silently skipped otherwise so the base notification always goes out.
pub fn build_timer_content(
    req: &TimerUpdate,
    now_ms: i64,
    supports_progress: bool,
) -> NotificationContent {
    let chronometer = if req.paused {
        None
    } else if req.countdown {
        Some(ChronometerMode::CountDown)
    } else {
        Some(ChronometerMode::CountUp)
    };

    let when_ms = match chronometer {
        Some(ChronometerMode::CountDown) => req.end_time_ms,
        Some(ChronometerMode::CountUp) => req.start_time_ms,
        None => None,
    };

    let progress = if supports_progress && !req.paused && req.countdown {
        match (req.start_time_ms, req.end_time_ms) {
            (Some(start), Some(end)) => progress_percent(start, end, now_ms),
            _ => None,
        }
    } else {
        None
    };

    NotificationContent {
        title: req.title.clone(),
        text: req.text.clone(),
        sub_text: req.sub_text.clone(),
        chronometer,
        when_ms,
        progress_percent: progress,
        ongoing: true,
        only_alert_once: true,
        show_when: true,
        public_on_lock_screen: true,
        resume_app_on_tap: true,
    }
}
