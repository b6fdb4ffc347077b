use serde::Serialize;
use time::Month;

use crate::locale;

/// The month a timesheet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    month: u8,
    year: i32,
}

impl Period {
    pub fn new(month: Month, year: i32) -> Self {
        Self {
            month: month.into(),
            year,
        }
    }

    /// The month containing the current local date.
    pub fn current() -> Self {
        let now = time::OffsetDateTime::now_local()
            .unwrap_or_else(|_| time::OffsetDateTime::now_utc());
        Self::new(now.month(), now.year())
    }

    pub fn month(&self) -> Month {
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    pub fn month_number(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// e.g. `Oktober 2025`
    pub fn label(&self) -> String {
        format!("{} {}", locale::month_label(self.month()), self.year)
    }

    /// e.g. `05.10.2025`
    pub fn format_day(&self, day: u8) -> String {
        format!("{:02}.{:02}.{}", day, self.month, self.year)
    }
}
