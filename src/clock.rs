//! Time sources for progress tracking
//!
//! The current instant is pulled from an injected [`TimeSource`]. Callers ask
//! for a fresh value with [`TimeSource::refresh`] and read the most recent one
//! with [`TimeSource::last_known`]. A source may have no value at all, in
//! which case the schedule is shown without progress markers.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use tracing::trace;

use crate::error::{ErrorCode, PlannerError, Result};

/// Pull-based source of the current instant
pub trait TimeSource: Send {
    /// Request a fresh reading
    fn refresh(&mut self);

    /// Most recent reading, if any
    fn last_known(&self) -> Option<DateTime<FixedOffset>>;
}

/// Reads the operating system clock on every refresh
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<DateTime<FixedOffset>>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for SystemClock {
    fn refresh(&mut self) {
        let now = DateTime::<FixedOffset>::from(Local::now());
        trace!("System clock refreshed: {}", now.to_rfc3339());
        self.last = Some(now);
    }

    fn last_known(&self) -> Option<DateTime<FixedOffset>> {
        self.last
    }
}

/// A clock set by hand, e.g. from `--now`; refreshing keeps the same value
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    instant: Option<DateTime<FixedOffset>>,
}

impl ManualClock {
    /// A clock that never has a reading
    pub fn unavailable() -> Self {
        Self { instant: None }
    }

    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self {
            instant: Some(instant),
        }
    }

    /// Parse an ISO-8601 instant such as `2026-03-14T16:30:00Z`
    pub fn from_iso(raw: &str) -> Result<Self> {
        parse_instant(raw).map(Self::at)
    }

    pub fn set(&mut self, instant: Option<DateTime<FixedOffset>>) {
        self.instant = instant;
    }
}

impl TimeSource for ManualClock {
    fn refresh(&mut self) {}

    fn last_known(&self) -> Option<DateTime<FixedOffset>> {
        self.instant
    }
}

/// Parse an ISO-8601 / RFC 3339 instant, accepting a trailing `Z`
pub fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| raw.parse::<DateTime<Utc>>().map(DateTime::<FixedOffset>::from))
        .map_err(|e| {
            PlannerError::validation_with_code(
                ErrorCode::VALIDATION_INVALID_TIME,
                format!("'{}' is not an ISO-8601 instant: {}", raw, e),
                Some("now".to_string()),
            )
        })
}

/// The operating system's current UTC offset
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Wall-clock time of `instant` in the bake's time zone
pub fn wall_clock(instant: DateTime<FixedOffset>, zone: FixedOffset) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// Calendar day of `instant` in the bake's time zone
pub fn calendar_day(instant: DateTime<FixedOffset>, zone: FixedOffset) -> NaiveDate {
    wall_clock(instant, zone).date()
}
