//! Determinate progress computation for the capsule presentation

/// Percentage of a countdown window already elapsed at `now_ms`.
///
/// Returns `None` for a degenerate window (zero or negative total duration),
/// so callers skip the progress attachment and still post the base
/// notification. Values outside the window clamp to 0 or 100.
pub fn progress_percent(start_ms: i64, end_ms: i64, now_ms: i64) -> Option<u8> {
    let total = end_ms.saturating_sub(start_ms);
    if total <= 0 {
        return None;
    }

    let elapsed = now_ms.saturating_sub(start_ms);
    let percent = (elapsed as f64 / total as f64 * 100.0).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_elapsed() {
        assert_eq!(progress_percent(0, 1000, 250), Some(25));
    }

    #[test]
    fn past_end_clamps_to_100() {
        assert_eq!(progress_percent(0, 1000, 1500), Some(100));
    }

    #[test]
    fn before_start_clamps_to_0() {
        assert_eq!(progress_percent(0, 1000, -100), Some(0));
    }

    #[test]
    fn zero_window_is_skipped() {
        assert_eq!(progress_percent(1000, 1000, 1000), None);
    }

    #[test]
    fn negative_window_is_skipped() {
        assert_eq!(progress_percent(2000, 1000, 1500), None);
    }

    #[test]
    fn rounds_to_nearest() {
        // 333 / 1000 elapsed
        assert_eq!(progress_percent(0, 1000, 333), Some(33));
        // 335 / 1000 elapsed rounds up
        assert_eq!(progress_percent(0, 1000, 335), Some(34));
    }

    #[test]
    fn epoch_scale_timestamps() {
        let start = 1_756_000_000_000_i64;
        let end = start + 1_500_000; // 25 minutes
        let now = start + 750_000;
        assert_eq!(progress_percent(start, end, now), Some(50));
    }
}
