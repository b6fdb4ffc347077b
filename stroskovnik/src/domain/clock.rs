use std::fmt;

use serde::{Serialize, Serializer};

/// Minutes since midnight of the scheduled day.
///
/// Values are never wrapped: a shift ending after midnight renders as `24:10`,
/// and an arrival scattered before midnight renders as `-00:05`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(i32);

impl ClockTime {
    pub const fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    pub const fn from_hm(hour: i32, minute: i32) -> Self {
        Self(hour * 60 + minute)
    }

    pub fn minutes(self) -> i32 {
        self.0
    }

    /// Saturates at the `i32` bounds instead of overflowing.
    pub fn plus_minutes(self, minutes: i32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    pub fn minutes_until(self, later: ClockTime) -> i32 {
        later.0.saturating_sub(self.0)
    }
}

impl From<time::Time> for ClockTime {
    fn from(value: time::Time) -> Self {
        Self::from_hm(i32::from(value.hour()), i32::from(value.minute()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minutes = self.0.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
