//! Signed durations against the monotonic clock
//!
//! `std::time::Duration` cannot go negative, but the time left on an expired
//! timer should, so timer arithmetic is reported as `chrono::TimeDelta`.

use std::time::{Duration, Instant};

use chrono::TimeDelta;

/// About thirty years; stands in for "never" when a deadline would overflow.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `later - earlier`, negative when `later` is in the past of `earlier`.
#[must_use]
pub fn signed_between(later: Instant, earlier: Instant) -> TimeDelta {
    match later.checked_duration_since(earlier) {
        Some(ahead) => TimeDelta::from_std(ahead).unwrap_or(TimeDelta::MAX),
        None => -TimeDelta::from_std(earlier.duration_since(later)).unwrap_or(TimeDelta::MAX),
    }
}

/// Whether `duration` lies in the past.
#[must_use]
pub fn is_neg(duration: TimeDelta) -> bool {
    duration < TimeDelta::zero()
}

/// A duration of `ms` milliseconds, saturating at the representable range.
#[must_use]
pub fn milliseconds(ms: i64) -> TimeDelta {
    TimeDelta::try_milliseconds(ms).unwrap_or(if ms < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

/// `now + duration`, clamped so huge durations do not overflow `Instant`.
#[must_use]
pub fn deadline_after(duration: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(duration)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}
