use std::fmt;
use std::ops::{Add, Sub};

use chrono::format::ParseError;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};

/// Timestamp pattern of the Common Log Format, e.g. `01/Jul/1995:00:00:01 -0400`.
pub const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// A newtype over the chrono timestamp so every crate talks about log time
// through one type. repr(transparent) -> same layout as the wrapped field.
/// A point in server-log time, second resolution, carrying the UTC offset
/// the input line had. Ordering compares the absolute instant, so records
/// with mixed offsets still sort by real time.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogInstant(DateTime<FixedOffset>);

impl LogInstant {
    /// Parses the `%d/%b/%Y:%H:%M:%S %z` pattern the log carries.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        DateTime::parse_from_str(text, CLF_TIME_FORMAT).map(Self)
    }

    /// Calendar date in the instant's own offset.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Hour of day (0..=23) in the instant's own offset.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Whole seconds from `self` to `later`. Negative if `later` is earlier.
    pub fn seconds_until(&self, later: LogInstant) -> i64 {
        later.0.signed_duration_since(self.0).num_seconds()
    }
}

impl fmt::Display for LogInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLF_TIME_FORMAT))
    }
}

impl Add<Duration> for LogInstant {
    type Output = LogInstant;

    fn add(self, rhs: Duration) -> LogInstant {
        LogInstant(self.0 + rhs)
    }
}

impl Sub<Duration> for LogInstant {
    type Output = LogInstant;

    fn sub(self, rhs: Duration) -> LogInstant {
        LogInstant(self.0 - rhs)
    }
}
