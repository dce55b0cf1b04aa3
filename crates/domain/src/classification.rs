use chrono::{DateTime, Utc};

/// Tolerance between event time and directory creation time, in milliseconds.
pub const NEW_WINDOW_MS: u64 = 3 * 60 * 1000;

/// Comparison of an event time against a directory creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationCheck {
    event_time_ms: i64,
    created_ms: i64,
}

impl CreationCheck {
    /// Builds a check from two UTC timestamps.
    #[must_use]
    pub fn new(event_time: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self::from_millis(event_time.timestamp_millis(), created_at.timestamp_millis())
    }

    /// Builds a check from epoch milliseconds.
    #[must_use]
    pub fn from_millis(event_time_ms: i64, created_ms: i64) -> Self {
        Self {
            event_time_ms,
            created_ms,
        }
    }

    /// Absolute distance between the two timestamps.
    ///
    /// Event sources and the directory may disagree on ordering by a few
    /// seconds, so the sign is discarded.
    #[must_use]
    pub fn skew_ms(&self) -> u64 {
        self.event_time_ms.abs_diff(self.created_ms)
    }

    /// Whether the event describes the user's creation.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.skew_ms() <= NEW_WINDOW_MS
    }
}
