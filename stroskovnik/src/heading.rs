//! Employee and period labels recovered from the page heading.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use time::Month;

use crate::{
    domain::Period,
    locale::{month_from_name, MONTH_NAMES},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// May be empty when the heading only names the period.
    pub employee_name: String,
    pub period: Period,
}

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\s+(\d{{4}})\b", MONTH_NAMES.join("|"))).unwrap()
});
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\.\s*(\d{1,2})\.\s*(\d{4})\s*[-–]\s*\d{1,2}\.\s*\d{1,2}\.\s*\d{4}").unwrap()
});
static NAME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ime\s+in\s+priimek\s*:\s*([^\n|;,]+)").unwrap());
static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*stro[šs]kovnik(?:\s+za\s+(?:obdobje|odbobje|mesec))?\s*[:\-–]?").unwrap()
});

/// Parse a heading such as `"Stroškovnik - Jane Doe - oktober 2025"` or
/// `"Ime in priimek: Jane Doe | 01.10.2025 - 31.10.2025"`.
pub fn parse_heading(text: &str) -> Option<Heading> {
    let (period, span) = match MONTH_YEAR.captures(text) {
        Some(caps) => {
            let month = month_from_name(&caps[1])?;
            let year: i32 = caps[2].parse().ok()?;
            (Period::new(month, year), caps.get(0)?.range())
        }
        None => {
            let caps = DATE_RANGE.captures(text)?;
            let month = Month::try_from(caps[2].parse::<u8>().ok()?).ok()?;
            let year: i32 = caps[3].parse().ok()?;
            (Period::new(month, year), caps.get(0)?.range())
        }
    };

    let employee_name = match NAME_LABEL.captures(text) {
        Some(caps) => clean_name(&caps[1]),
        None => {
            let mut rest = String::with_capacity(text.len());
            rest.push_str(&text[..span.start]);
            rest.push(' ');
            rest.push_str(&text[span.end..]);
            clean_name(&TITLE_PREFIX.replace(&rest, ""))
        }
    };

    Some(Heading {
        employee_name,
        period,
    })
}

fn clean_name(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|word| !word.chars().all(|c| "-–—:|,/()".contains(c)))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| "-–—:|,/()".contains(c) || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_month_and_year() {
        let heading = parse_heading("Jane Doe - oktober 2025").unwrap();
        assert_eq!(heading.employee_name, "Jane Doe");
        assert_eq!(heading.period, Period::new(Month::October, 2025));
    }

    #[test]
    fn title_prefix_is_dropped() {
        let heading = parse_heading("Stroškovnik za mesec: Marec 2024 - Janez Novak").unwrap();
        assert_eq!(heading.employee_name, "Janez Novak");
        assert_eq!(heading.period, Period::new(Month::March, 2024));
    }

    #[test]
    fn labelled_name_and_date_range() {
        let heading =
            parse_heading("Ime in priimek: Jane Doe | 01.09.2025 - 30.09.2025").unwrap();
        assert_eq!(heading.employee_name, "Jane Doe");
        assert_eq!(heading.period, Period::new(Month::September, 2025));
    }

    #[test]
    fn period_only_heading_has_empty_name() {
        let heading = parse_heading("STROŠKOVNIK ZA OBDOBJE: 01.12.2025 - 31.12.2025").unwrap();
        assert_eq!(heading.employee_name, "");
        assert_eq!(heading.period, Period::new(Month::December, 2025));
    }

    #[test]
    fn portal_spelling_of_period_title_is_stripped() {
        let heading = parse_heading("STROŠKOVNIK ZA ODBOBJE: 01.10.2025 - 31.10.2025").unwrap();
        assert_eq!(heading.employee_name, "");
        assert_eq!(heading.period, Period::new(Month::October, 2025));
    }

    #[test]
    fn heading_without_period_is_rejected() {
        assert_eq!(parse_heading("Jane Doe"), None);
        assert_eq!(parse_heading("Jane Doe - october 2025"), None);
        assert_eq!(parse_heading("01.13.2025 - 31.13.2025"), None);
    }
}
