use serde::Serialize;

use crate::{
    domain::{Classification, DaySchedule, Engagement, ScheduleBatch},
    filename::batch_file_name,
};

pub const DOCUMENT_TITLE: &str = "Pregled delovnega časa";
pub const COLUMN_HEADERS: [&str; 5] = [
    "Datum",
    "Čas prihoda",
    "Čas odhoda",
    "Skupaj število ur",
    "Odmor med delovnim časom",
];
const BUSINESS_TRIP_LABEL: &str = "Službeno potovanje";
const TOTALS_LABEL: &str = "Skupaj:";
const EMPTY: &str = "-";

/// One table row of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub date: String,
    pub arrival: String,
    pub departure: String,
    pub hours: String,
    pub break_time: String,
}

impl DocumentRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.arrival.as_str(),
            self.departure.as_str(),
            self.hours.as_str(),
            self.break_time.as_str(),
        ]
    }
}

/// Everything a renderer needs to lay out one batch. Renderers never see raw aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetDocument {
    pub file_name: String,
    pub title: String,
    pub subtitle: String,
    pub columns: [&'static str; 5],
    pub rows: Vec<DocumentRow>,
    pub totals: DocumentRow,
}

impl TimesheetDocument {
    pub fn from_batch(batch: &ScheduleBatch) -> Self {
        let rows = batch
            .days
            .iter()
            .map(|day| day_row(day, &batch.period.format_day(day.day)))
            .collect();

        let total_breaks = batch.total_break_minutes();
        let totals = DocumentRow {
            date: TOTALS_LABEL.to_string(),
            arrival: String::new(),
            departure: String::new(),
            hours: format!("{:.1}", batch.total_work_hours()),
            break_time: format!("{} min", total_breaks),
        };

        Self {
            file_name: batch_file_name(batch),
            title: DOCUMENT_TITLE.to_string(),
            subtitle: subtitle(batch),
            columns: COLUMN_HEADERS,
            rows,
            totals,
        }
    }
}

fn subtitle(batch: &ScheduleBatch) -> String {
    let mut subtitle = batch.period.label();
    if !batch.employee_name.is_empty() {
        subtitle.push_str(" - ");
        subtitle.push_str(&batch.employee_name);
    }
    if let Engagement::Secondary { name } = &batch.engagement {
        if !name.is_empty() {
            subtitle.push_str(" (");
            subtitle.push_str(name);
            subtitle.push(')');
        }
    }
    subtitle
}

fn day_row(day: &DaySchedule, date: &str) -> DocumentRow {
    match day.classification {
        Classification::BusinessTrip => DocumentRow {
            date: date.to_string(),
            arrival: EMPTY.to_string(),
            departure: EMPTY.to_string(),
            hours: BUSINESS_TRIP_LABEL.to_string(),
            break_time: EMPTY.to_string(),
        },
        Classification::RegularWork { arrival, departure } => DocumentRow {
            date: date.to_string(),
            arrival: arrival.to_string(),
            departure: departure.to_string(),
            hours: format!("{:.1}", day.work_hours),
            break_time: if day.break_minutes > 0 {
                format!("{} min", day.break_minutes)
            } else {
                EMPTY.to_string()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::domain::{ClockTime, Period};

    fn batch(engagement: Engagement) -> ScheduleBatch {
        ScheduleBatch {
            employee_name: "Jane Doe".into(),
            period: Period::new(Month::October, 2025),
            engagement,
            days: vec![
                DaySchedule::regular(1, ClockTime::from_hm(8, 55), 7.5, 7.5, 28),
                DaySchedule::business_trip(2, 8.0),
                DaySchedule::regular(3, ClockTime::from_hm(9, 4), 0.5, 0.5, 0),
            ],
        }
    }

    #[test]
    fn regular_and_trip_rows() {
        let document = TimesheetDocument::from_batch(&batch(Engagement::Primary));

        assert_eq!(
            document.rows[0].cells(),
            ["01.10.2025", "08:55", "16:25", "7.5", "28 min"]
        );
        assert_eq!(
            document.rows[1].cells(),
            ["02.10.2025", "-", "-", "Službeno potovanje", "-"]
        );
        assert_eq!(document.rows[2].break_time, "-");
    }

    #[test]
    fn totals_sum_work_hours_and_breaks() {
        let document = TimesheetDocument::from_batch(&batch(Engagement::Primary));
        assert_eq!(document.totals.cells(), ["Skupaj:", "", "", "8.0", "28 min"]);
    }

    #[test]
    fn labels_and_file_name() {
        let primary = TimesheetDocument::from_batch(&batch(Engagement::Primary));
        assert_eq!(primary.title, "Pregled delovnega časa");
        assert_eq!(primary.subtitle, "Oktober 2025 - Jane Doe");
        assert_eq!(primary.file_name, "10_2025_JaneDoe.pdf");

        let secondary = TimesheetDocument::from_batch(&batch(Engagement::Secondary {
            name: "Tutor Job".into(),
        }));
        assert_eq!(secondary.subtitle, "Oktober 2025 - Jane Doe (Tutor Job)");
        assert_eq!(secondary.file_name, "10_2025_JaneDoe_TutorJob.pdf");
    }
}
