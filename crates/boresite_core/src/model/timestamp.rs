//! Epoch-millisecond stamps for `created_at` / `updated_at`.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall clock as Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock is before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Returns a stamp that is at least `now` and strictly after `previous`.
///
/// Two mutations inside the same millisecond still produce increasing
/// `updated_at` values.
pub fn next_stamp(previous: i64, now: i64) -> i64 {
    now.max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::{next_stamp, now_epoch_ms};

    #[test]
    fn next_stamp_prefers_wall_clock_when_ahead() {
        assert_eq!(next_stamp(1_000, 5_000), 5_000);
    }

    #[test]
    fn next_stamp_bumps_past_previous_when_clock_stalls() {
        assert_eq!(next_stamp(5_000, 5_000), 5_001);
        assert_eq!(next_stamp(5_000, 4_000), 5_001);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
