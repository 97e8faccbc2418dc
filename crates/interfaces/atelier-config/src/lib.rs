//! Central configuration constants for runtime limits and defaults.

/// Default interval between order status polls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Minimum allowed poll interval. Anything faster just hammers the feed.
pub const MIN_POLL_INTERVAL_SECS: u64 = 5;

/// Maximum allowed poll interval.
pub const MAX_POLL_INTERVAL_SECS: u64 = 600;

/// Convenience function to clamp a poll interval into allowed range.
pub fn clamp_poll_interval(v: u64) -> u64 {
    v.clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS)
}
