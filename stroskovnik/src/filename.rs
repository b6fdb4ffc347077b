use crate::domain::{Engagement, Period, ScheduleBatch};

const FALLBACK_NAME: &str = "Timesheet";
const FALLBACK_ENGAGEMENT: &str = "Secondary";

/// Keep ASCII letters only, so `"Jane Doe"` becomes `"JaneDoe"`. Local diacritics are folded
/// to their base letter first.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(fold_diacritic)
        .filter(char::is_ascii_alphabetic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'č' | 'ć' => 'c',
        'Č' | 'Ć' => 'C',
        'š' => 's',
        'Š' => 'S',
        'ž' => 'z',
        'Ž' => 'Z',
        'đ' => 'd',
        'Đ' => 'D',
        other => other,
    }
}

fn or_fallback(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// `{MM}_{yyyy}_{name}.pdf`
pub fn primary_file_name(employee_name: &str, period: &Period) -> String {
    format!("{}.pdf", file_stem(employee_name, period))
}

/// `{MM}_{yyyy}_{name}_{engagement}.pdf`
pub fn secondary_file_name(employee_name: &str, period: &Period, engagement: &str) -> String {
    format!(
        "{}_{}.pdf",
        file_stem(employee_name, period),
        or_fallback(sanitize_name(engagement), FALLBACK_ENGAGEMENT)
    )
}

pub fn batch_file_name(batch: &ScheduleBatch) -> String {
    match &batch.engagement {
        Engagement::Primary => primary_file_name(&batch.employee_name, &batch.period),
        Engagement::Secondary { name } => {
            secondary_file_name(&batch.employee_name, &batch.period, name)
        }
    }
}

/// Folder used when a whole directory of pages is processed, e.g. `Oktober_2025`.
pub fn period_folder_name(period: &Period) -> String {
    period.label().replace(' ', "_")
}

fn file_stem(employee_name: &str, period: &Period) -> String {
    format!(
        "{:02}_{}_{}",
        period.month_number(),
        period.year(),
        or_fallback(sanitize_name(employee_name), FALLBACK_NAME)
    )
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    fn october() -> Period {
        Period::new(Month::October, 2025)
    }

    #[test]
    fn primary_name() {
        assert_eq!(primary_file_name("Jane Doe", &october()), "10_2025_JaneDoe.pdf");
    }

    #[test]
    fn secondary_name_appends_engagement() {
        assert_eq!(
            secondary_file_name("Jane Doe", &october(), "Tutor Job"),
            "10_2025_JaneDoe_TutorJob.pdf"
        );
    }

    #[test]
    fn non_letters_are_stripped() {
        assert_eq!(sanitize_name("Ana-Marija  O'Neil 2"), "AnaMarijaONeil");
        assert_eq!(sanitize_name("Žiga Čeh"), "ZigaCeh");
        assert_eq!(sanitize_name("Zoë"), "Zo");
    }

    #[test]
    fn empty_names_fall_back() {
        assert_eq!(primary_file_name("123", &october()), "10_2025_Timesheet.pdf");
        assert_eq!(
            secondary_file_name("Jane Doe", &october(), ""),
            "10_2025_JaneDoe_Secondary.pdf"
        );
    }

    #[test]
    fn single_digit_months_are_padded() {
        let march = Period::new(Month::March, 2024);
        assert_eq!(primary_file_name("Jane Doe", &march), "03_2024_JaneDoe.pdf");
    }

    #[test]
    fn folder_name_uses_month_label() {
        assert_eq!(period_folder_name(&october()), "Oktober_2025");
    }
}
