//! Timer domain module

mod duration;
mod progress;
mod request;

pub use duration::{format_clock_span, now_epoch_ms, Duration};
pub use progress::progress_percent;
pub use request::{
    TimerUpdate, ARG_END_TIME_MS, ARG_IS_COUNTDOWN, ARG_IS_PAUSED, ARG_START_TIME_MS,
    ARG_SUB_TEXT, ARG_TEXT, ARG_TITLE,
};
