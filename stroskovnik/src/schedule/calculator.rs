use crate::domain::{DayAggregate, DaySchedule, Settings};

use super::{break_minutes, ScatterSource};

/// Schedule one day.
///
/// Trip-only days become business trips without clock times. Every other day is regular work
/// of `hours_regular`, arriving at the configured time moved by one scatter draw.
pub fn compute(
    aggregate: &DayAggregate,
    settings: &Settings,
    scatter: &mut impl ScatterSource,
) -> DaySchedule {
    if aggregate.is_business_trip() {
        return DaySchedule::business_trip(aggregate.day, aggregate.hours_trip);
    }

    let work_hours = aggregate.hours_regular;
    let arrival = settings
        .base_arrival()
        .plus_minutes(scatter.offset(settings.scattering_minutes));

    DaySchedule::regular(
        aggregate.day,
        arrival,
        work_hours,
        work_hours,
        break_minutes(work_hours),
    )
}

/// Schedule every day of a month, drawing a fresh offset per regular day.
pub fn compute_all(
    aggregates: &[DayAggregate],
    settings: &Settings,
    scatter: &mut impl ScatterSource,
) -> Vec<DaySchedule> {
    aggregates
        .iter()
        .map(|aggregate| compute(aggregate, settings, scatter))
        .collect()
}
