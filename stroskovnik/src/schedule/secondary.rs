use crate::domain::{
    DaySchedule, Engagement, ScheduleBatch, SecondaryDaySchedule, SecondaryWork, Settings,
};

use super::{break_minutes, STANDARD_DAY_HOURS};

/// Hours of the secondary engagement on a worked day.
pub fn secondary_work_hours(work: &SecondaryWork) -> f64 {
    work.percent / 100.0 * STANDARD_DAY_HOURS
}

/// Chain a secondary day onto a primary one: it starts exactly when the primary shift ends.
pub fn derive_secondary(primary: &DaySchedule, work: &SecondaryWork) -> SecondaryDaySchedule {
    let Some(arrival) = primary.departure() else {
        return DaySchedule::business_trip(primary.day, primary.total_hours);
    };

    let work_hours = secondary_work_hours(work);
    let breaks = if work.include_breaks {
        break_minutes(work_hours)
    } else {
        0
    };

    DaySchedule::regular(primary.day, arrival, work_hours, work_hours, breaks)
}

/// The secondary batch for a primary batch, or `None` when secondary work is off.
pub fn derive_secondary_batch(primary: &ScheduleBatch, settings: &Settings) -> Option<ScheduleBatch> {
    let work = settings.secondary()?;
    let days = primary
        .days
        .iter()
        .map(|day| derive_secondary(day, &work))
        .collect();

    Some(ScheduleBatch {
        employee_name: primary.employee_name.clone(),
        period: primary.period,
        engagement: Engagement::Secondary { name: work.name },
        days,
    })
}
