use serde::Serialize;

use super::WorkType;

/// Raw hour totals of one calendar day, as read from the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    pub day: u8,
    pub hours_regular: f64,
    pub hours_trip: f64,
}

impl DayAggregate {
    pub fn new(day: u8, hours_regular: f64, hours_trip: f64) -> Self {
        Self {
            day,
            hours_regular,
            hours_trip,
        }
    }

    pub(crate) fn empty(day: u8) -> Self {
        Self::new(day, 0.0, 0.0)
    }

    pub(crate) fn add(&mut self, work_type: WorkType, hours: f64) {
        match work_type {
            WorkType::Regular => self.hours_regular += hours,
            WorkType::BusinessTrip => self.hours_trip += hours,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.hours_regular + self.hours_trip
    }

    /// A day with trip hours and no regular hours.
    pub fn is_business_trip(&self) -> bool {
        self.hours_trip > 0.0 && self.hours_regular == 0.0
    }
}
