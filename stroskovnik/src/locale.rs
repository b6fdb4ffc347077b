use time::Month;

/// Slovenian month names, lowercase, in calendar order.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "januar",
    "februar",
    "marec",
    "april",
    "maj",
    "junij",
    "julij",
    "avgust",
    "september",
    "oktober",
    "november",
    "december",
];

/// Short forms used in the day column headers of the timesheet table.
pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "maj", "jun", "jul", "avg", "sep", "okt", "nov", "dec",
];

pub(crate) fn month_from_name(name: &str) -> Option<Month> {
    let name = name.to_lowercase();
    let index = MONTH_NAMES.iter().position(|m| *m == name)?;
    Month::try_from(index as u8 + 1).ok()
}

/// Capitalised month name, e.g. `Oktober`.
pub(crate) fn month_label(month: Month) -> String {
    let name = MONTH_NAMES[u8::from(month) as usize - 1];
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
