//! Timer update request value object
//!
//! The bridge delivers loosely-typed named arguments; this module turns them
//! into a fully-defaulted request exactly once, at the boundary. Decoding is
//! total: a missing or wrong-typed entry falls back to its documented default
//! instead of failing.

use serde_json::{Map, Value};

use crate::domain::notification::DEFAULT_APP_LABEL;

/// Argument names accepted by the update command.
pub const ARG_TITLE: &str = "title";
pub const ARG_TEXT: &str = "text";
pub const ARG_SUB_TEXT: &str = "subText";
pub const ARG_END_TIME_MS: &str = "endTimeMs";
pub const ARG_START_TIME_MS: &str = "startTimeMs";
pub const ARG_IS_COUNTDOWN: &str = "isCountdown";
pub const ARG_IS_PAUSED: &str = "isPaused";

/// A fully-defaulted request to update the singleton timer notification.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerUpdate {
    /// Headline of the notification.
    pub title: String,
    /// Body text; the only content shown while paused.
    pub text: String,
    /// Secondary label; defaults to the app label.
    pub sub_text: String,
    /// Absolute end of the timer window, ms since the Unix epoch.
    pub end_time_ms: Option<i64>,
    /// Absolute start of the timer window, ms since the Unix epoch.
    pub start_time_ms: Option<i64>,
    /// Countdown toward `end_time_ms` (true) or stopwatch from
    /// `start_time_ms` (false).
    pub countdown: bool,
    /// Paused timers show static text instead of a live timer line.
    pub paused: bool,
}

impl Default for TimerUpdate {
    fn default() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            sub_text: DEFAULT_APP_LABEL.to_string(),
            end_time_ms: None,
            start_time_ms: None,
            countdown: true,
            paused: false,
        }
    }
}

impl TimerUpdate {
    /// Decode a request from the bridge's named-argument map.
    pub fn from_args(args: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        Self {
            title: string_arg(args, ARG_TITLE).unwrap_or(defaults.title),
            text: string_arg(args, ARG_TEXT).unwrap_or(defaults.text),
            sub_text: string_arg(args, ARG_SUB_TEXT).unwrap_or(defaults.sub_text),
            end_time_ms: millis_arg(args, ARG_END_TIME_MS),
            start_time_ms: millis_arg(args, ARG_START_TIME_MS),
            countdown: bool_arg(args, ARG_IS_COUNTDOWN).unwrap_or(defaults.countdown),
            paused: bool_arg(args, ARG_IS_PAUSED).unwrap_or(defaults.paused),
        }
    }

    /// Encode the request back into the bridge's argument map.
    /// Absent timestamps are omitted rather than sent as null.
    pub fn to_args(&self) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert(ARG_TITLE.to_string(), Value::from(self.title.clone()));
        args.insert(ARG_TEXT.to_string(), Value::from(self.text.clone()));
        args.insert(ARG_SUB_TEXT.to_string(), Value::from(self.sub_text.clone()));
        if let Some(end) = self.end_time_ms {
            args.insert(ARG_END_TIME_MS.to_string(), Value::from(end));
        }
        if let Some(start) = self.start_time_ms {
            args.insert(ARG_START_TIME_MS.to_string(), Value::from(start));
        }
        args.insert(ARG_IS_COUNTDOWN.to_string(), Value::from(self.countdown));
        args.insert(ARG_IS_PAUSED.to_string(), Value::from(self.paused));
        args
    }
}

fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key)?.as_str().map(str::to_string)
}

fn bool_arg(args: &Map<String, Value>, key: &str) -> Option<bool> {
    args.get(key)?.as_bool()
}

/// Normalize a bridge number to integral milliseconds.
///
/// The bridge does not guarantee a numeric representation: integers may
/// arrive as i64 or u64, and some peers serialize timestamps as doubles.
/// Fractional values truncate toward zero; non-numbers are treated as absent.
fn millis_arg(args: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = args.get(key)?;

    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }
    if let Some(ms) = value.as_u64() {
        return Some(i64::try_from(ms).unwrap_or(i64::MAX));
    }
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}
