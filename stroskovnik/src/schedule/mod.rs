//! Derivation of concrete day schedules from extracted hour totals.

mod calculator;
mod scatter;
mod secondary;

pub use calculator::*;
pub use scatter::*;
pub use secondary::*;

/// Reference day the break entitlement and secondary percentages are scaled against.
pub const STANDARD_DAY_HOURS: f64 = 8.0;
/// Break minutes earned by a full standard day.
pub const STANDARD_BREAK_MINUTES: f64 = 30.0;

/// `round(30 * hours / 8)`
pub fn break_minutes(work_hours: f64) -> u32 {
    (STANDARD_BREAK_MINUTES * work_hours / STANDARD_DAY_HOURS)
        .round()
        .max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_scales_linearly_with_hours() {
        assert_eq!(break_minutes(8.0), 30);
        assert_eq!(break_minutes(4.0), 15);
        assert_eq!(break_minutes(7.5), 28);
        assert_eq!(break_minutes(5.0), 19);
        assert_eq!(break_minutes(0.0), 0);
    }
}
