use serde::Serialize;

use super::{ClockTime, Period};

/// How a scheduled day is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Classification {
    RegularWork {
        arrival: ClockTime,
        departure: ClockTime,
    },
    /// Travel days carry no clock times at all.
    BusinessTrip,
}

/// One calendar day of a derived schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: u8,
    pub classification: Classification,
    pub total_hours: f64,
    pub work_hours: f64,
    pub break_minutes: u32,
}

/// Secondary days share the primary shape; only the derivation differs.
pub type SecondaryDaySchedule = DaySchedule;

impl DaySchedule {
    /// A worked day. The departure is `arrival + round(work_hours * 60)`, breaks are not
    /// subtracted from the span.
    pub fn regular(
        day: u8,
        arrival: ClockTime,
        total_hours: f64,
        work_hours: f64,
        break_minutes: u32,
    ) -> Self {
        let departure = arrival.plus_minutes(work_minutes(work_hours));
        Self {
            day,
            classification: Classification::RegularWork { arrival, departure },
            total_hours,
            work_hours,
            break_minutes,
        }
    }

    pub fn business_trip(day: u8, total_hours: f64) -> Self {
        Self {
            day,
            classification: Classification::BusinessTrip,
            total_hours,
            work_hours: 0.0,
            break_minutes: 0,
        }
    }

    pub fn arrival(&self) -> Option<ClockTime> {
        match self.classification {
            Classification::RegularWork { arrival, .. } => Some(arrival),
            Classification::BusinessTrip => None,
        }
    }

    pub fn departure(&self) -> Option<ClockTime> {
        match self.classification {
            Classification::RegularWork { departure, .. } => Some(departure),
            Classification::BusinessTrip => None,
        }
    }

    pub fn is_business_trip(&self) -> bool {
        matches!(self.classification, Classification::BusinessTrip)
    }
}

/// Whole minutes of a fractional hour value, rounded to the nearest minute. Out-of-range values
/// saturate at the `i32` bounds.
pub fn work_minutes(hours: f64) -> i32 {
    (hours * 60.0).round() as i32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Engagement {
    Primary,
    Secondary { name: String },
}

/// All scheduled days of one engagement for one employee and month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBatch {
    pub employee_name: String,
    pub period: Period,
    pub engagement: Engagement,
    pub days: Vec<DaySchedule>,
}

impl ScheduleBatch {
    pub fn primary(employee_name: impl Into<String>, period: Period, days: Vec<DaySchedule>) -> Self {
        Self {
            employee_name: employee_name.into(),
            period,
            engagement: Engagement::Primary,
            days,
        }
    }

    pub fn total_work_hours(&self) -> f64 {
        self.days.iter().map(|d| d.work_hours).sum()
    }

    pub fn total_break_minutes(&self) -> u32 {
        self.days
            .iter()
            .fold(0u32, |total, d| total.saturating_add(d.break_minutes))
    }
}
