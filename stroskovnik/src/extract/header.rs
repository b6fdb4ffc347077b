//! Day resolution for the header row of the timesheet table.
//!
//! Header cells are loosely formatted (`"5 okt"`, `"5.okt"`, `"<span>5</span><br>sre"`, `"P 5"`),
//! so each cell is tried against an ordered list of matchers. The first matcher that recognises
//! the cell decides its day number, even when that number turns out to be out of range.

use std::sync::LazyLock;

use regex::Regex;

use crate::locale::MONTH_ABBREVIATIONS;

/// One header cell as seen by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCell {
    /// Visible text with whitespace collapsed.
    pub text: String,
    /// Inner markup of the cell.
    pub markup: String,
}

impl HeaderCell {
    pub fn new(text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: markup.into(),
        }
    }

    /// A cell whose markup is its text.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            markup: text.clone(),
            text,
        }
    }
}

/// A pure `(text, markup) -> day` matcher.
pub type DayMatcher = fn(&str, &str) -> Option<u32>;

/// Matchers in the order they are tried.
pub const DAY_MATCHERS: [(&str, DayMatcher); 5] = [
    ("day-month", day_with_separated_month),
    ("day-month-compact", day_with_compact_month),
    ("markup-digits", digits_in_markup),
    ("weekday-day", weekday_prefixed_day),
    ("bare-number", bare_number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayResolution {
    Day(u8),
    /// A matcher fired but the number is not a calendar day.
    OutOfRange(u32),
    Unmatched,
}

static MONTH_ALTERNATION: LazyLock<String> = LazyLock::new(|| MONTH_ABBREVIATIONS.join("|"));

static SEPARATED_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*(\d{{1,2}})(?:\s*[./-]\s*|\s+)(?:{})",
        *MONTH_ALTERNATION
    ))
    .unwrap()
});
static COMPACT_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\s*(\d{{1,2}})(?:{})", *MONTH_ALTERNATION)).unwrap()
});
static MARKUP_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*(\d{1,2})\s*<").unwrap());
static WEEKDAY_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\p{L}{1,3}\.?\s+(\d{1,2})\.?\s*$").unwrap());
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\.?\s*$").unwrap());

fn first_number(re: &Regex, haystack: &str) -> Option<u32> {
    re.captures(haystack)?.get(1)?.as_str().parse().ok()
}

/// `"5 okt"`, `"5. okt"`, `"05-okt"`
pub fn day_with_separated_month(text: &str, _markup: &str) -> Option<u32> {
    first_number(&SEPARATED_MONTH, text)
}

/// `"5okt"`
pub fn day_with_compact_month(text: &str, _markup: &str) -> Option<u32> {
    first_number(&COMPACT_MONTH, text)
}

/// `<span class="day">5</span><br>sre`
pub fn digits_in_markup(_text: &str, markup: &str) -> Option<u32> {
    first_number(&MARKUP_DIGITS, markup)
}

/// `"P 1"`, `"sre 5"`
pub fn weekday_prefixed_day(text: &str, _markup: &str) -> Option<u32> {
    first_number(&WEEKDAY_DAY, text)
}

/// `"3"`, `"3."`
pub fn bare_number(text: &str, _markup: &str) -> Option<u32> {
    first_number(&BARE_NUMBER, text)
}

pub fn resolve_day(cell: &HeaderCell) -> DayResolution {
    for (name, matcher) in DAY_MATCHERS {
        if let Some(number) = matcher(&cell.text, &cell.markup) {
            tracing::trace!(matcher = name, number, text = %cell.text, "header matched");
            return match u8::try_from(number) {
                Ok(day) if (1..=31).contains(&day) => DayResolution::Day(day),
                _ => DayResolution::OutOfRange(number),
            };
        }
    }
    DayResolution::Unmatched
}
