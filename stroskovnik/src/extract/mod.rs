//! Turns a scraped timesheet table into per-day hour totals.

mod header;
mod table;

pub use header::*;
pub use table::*;

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::domain::{DayAggregate, ExtractError, WorkType};

/// First-cell labels of rows that only repeat totals of the rows above them.
const SUMMARY_LABELS: [&str; 4] = ["vsota", "skupaj", "total", "sum"];

/// A header column that resolved to a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub column: usize,
    pub day: u8,
}

/// Irregularities that were absorbed while reading the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anomaly {
    DayOutOfRange { column: usize, number: u32 },
    DuplicateDayColumn { column: usize, day: u8 },
    UnrecognizedWorkTypeCode { row: usize, code: String },
    MalformedCellValue { row: usize, day: u8, raw: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::DayOutOfRange { column, number } => {
                write!(f, "column {}: header day {} is out of range", column, number)
            }
            Anomaly::DuplicateDayColumn { column, day } => {
                write!(f, "column {}: day {} already has a column", column, day)
            }
            Anomaly::UnrecognizedWorkTypeCode { row, code } => {
                write!(f, "row {}: unrecognized work type code '{}'", row, code)
            }
            Anomaly::MalformedCellValue { row, day, raw } => {
                write!(f, "row {}, day {}: '{}' is not a number", row, day, raw)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    /// Days with a nonzero total, ascending.
    pub days: Vec<DayAggregate>,
    pub day_columns: Vec<DayColumn>,
    pub anomalies: Vec<Anomaly>,
}

/// A single entry can not cover more than one calendar day.
const MAX_CELL_HOURS: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CellValue {
    Empty,
    Hours(f64),
    Malformed,
}

/// Parse an hour entry, accepting the decimal comma. Zero and negative entries count as empty,
/// entries above 24 hours as malformed.
fn parse_hours(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return CellValue::Empty;
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match normalized.parse::<f64>() {
        Ok(hours) if !hours.is_finite() || hours > MAX_CELL_HOURS => CellValue::Malformed,
        Ok(hours) if hours > 0.0 => CellValue::Hours(hours),
        Ok(_) => CellValue::Empty,
        Err(_) => CellValue::Malformed,
    }
}

fn is_summary_row(label: Option<&str>) -> bool {
    let Some(label) = label else {
        return false;
    };
    let label = label.trim().to_lowercase();
    SUMMARY_LABELS.iter().any(|keyword| label.contains(keyword))
}

/// Map header columns to days. Later columns claiming an already seen day are ignored.
pub fn resolve_day_columns(headers: &[HeaderCell]) -> (Vec<DayColumn>, Vec<Anomaly>) {
    let mut columns: Vec<DayColumn> = Vec::new();
    let mut anomalies = Vec::new();

    for (column, cell) in headers.iter().enumerate() {
        match resolve_day(cell) {
            DayResolution::Day(day) if columns.iter().any(|c| c.day == day) => {
                anomalies.push(Anomaly::DuplicateDayColumn { column, day });
            }
            DayResolution::Day(day) => columns.push(DayColumn { column, day }),
            DayResolution::OutOfRange(number) => {
                anomalies.push(Anomaly::DayOutOfRange { column, number });
            }
            DayResolution::Unmatched => {}
        }
    }

    (columns, anomalies)
}

/// Sum every row's hours per day and work type.
///
/// Extraction is deterministic: the same table always yields the same aggregates.
#[tracing::instrument(level = "debug", skip_all)]
pub fn extract<T: TableSource + ?Sized>(table: &T) -> Result<Extraction, ExtractError> {
    let headers = table.header_cells();
    if headers.is_empty() {
        return Err(ExtractError::NoTableFound);
    }

    let (day_columns, mut anomalies) = resolve_day_columns(headers);
    if day_columns.is_empty() {
        return Err(ExtractError::NoDayColumnsResolved);
    }
    tracing::debug!("resolved {} day columns", day_columns.len());

    let mut totals: BTreeMap<u8, DayAggregate> = BTreeMap::new();

    for row in 0..table.row_count() {
        if is_summary_row(table.row_label(row)) {
            tracing::debug!(row, "skipping summary row");
            continue;
        }

        let Some(code) = table.work_type_code(row).map(str::trim) else {
            tracing::debug!(row, "row has no work type code");
            continue;
        };

        let work_type = match code.parse::<WorkType>() {
            Ok(work_type) => work_type,
            Err(_) => {
                tracing::warn!(row, code, "unrecognized work type code, row ignored");
                anomalies.push(Anomaly::UnrecognizedWorkTypeCode {
                    row,
                    code: code.to_string(),
                });
                continue;
            }
        };

        for DayColumn { column, day } in &day_columns {
            let Some(raw) = table.cell(row, *column) else {
                continue;
            };
            match parse_hours(raw) {
                CellValue::Hours(hours) => totals
                    .entry(*day)
                    .or_insert_with(|| DayAggregate::empty(*day))
                    .add(work_type, hours),
                CellValue::Empty => {}
                CellValue::Malformed => {
                    tracing::warn!(row, day, raw, "malformed hour value treated as zero");
                    anomalies.push(Anomaly::MalformedCellValue {
                        row,
                        day: *day,
                        raw: raw.to_string(),
                    });
                }
            }
        }
    }

    let days = totals
        .into_values()
        .filter(|aggregate| aggregate.total_hours() > 0.0)
        .collect();

    Ok(Extraction {
        days,
        day_columns,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, cells: &[&str]) -> RawRow {
        RawRow::new(Some(code), cells.iter().map(|c| c.to_string()).collect())
    }

    fn table(headers: &[&str], rows: Vec<RawRow>) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| HeaderCell::text(*h)).collect(),
            rows,
        }
    }

    fn october_table() -> RawTable {
        table(
            &["Projekt", "Naziv", "Šifra", "1 okt", "2 okt", "3 okt", "abc"],
            vec![
                row("001", &["P-100", "Razvoj", "001", "7,5", "8", "", "9"]),
                row("001", &["P-200", "Podpora", "001", "0,5", "", "", ""]),
                row("002", &["P-100", "Potovanje", "002", "", "", "8", ""]),
                row("010", &["P-300", "Bolniška", "010", "", "8", "", ""]),
            ],
        )
    }

    #[test]
    fn decimal_comma_is_normalized() {
        assert_eq!(parse_hours("7,5"), CellValue::Hours(7.5));
        assert_eq!(parse_hours(" 8.25 "), CellValue::Hours(8.25));
    }

    #[test]
    fn blank_and_non_positive_values_are_empty() {
        assert_eq!(parse_hours(""), CellValue::Empty);
        assert_eq!(parse_hours("-"), CellValue::Empty);
        assert_eq!(parse_hours("0"), CellValue::Empty);
        assert_eq!(parse_hours("0,0"), CellValue::Empty);
        assert_eq!(parse_hours("-2"), CellValue::Empty);
    }

    #[test]
    fn non_numeric_values_are_malformed() {
        assert_eq!(parse_hours("x"), CellValue::Malformed);
        assert_eq!(parse_hours("7,5h"), CellValue::Malformed);
        assert_eq!(parse_hours("NaN"), CellValue::Malformed);
    }

    #[test]
    fn entries_longer_than_a_day_are_malformed() {
        assert_eq!(parse_hours("24"), CellValue::Hours(24.0));
        assert_eq!(parse_hours("24,5"), CellValue::Malformed);
        assert_eq!(parse_hours("1e9"), CellValue::Malformed);

        let t = table(&["Šifra", "1", "2"], vec![row("001", &["001", "1e9", "8"])]);
        let extraction = extract(&t).unwrap();
        assert_eq!(extraction.days, vec![DayAggregate::new(2, 8.0, 0.0)]);
        assert_eq!(
            extraction.anomalies,
            vec![Anomaly::MalformedCellValue {
                row: 0,
                day: 1,
                raw: "1e9".into()
            }]
        );
    }

    #[test]
    fn hours_are_summed_per_day_and_work_type() {
        let extraction = extract(&october_table()).unwrap();

        assert_eq!(
            extraction.days,
            vec![
                DayAggregate::new(1, 8.0, 0.0),
                DayAggregate::new(2, 8.0, 0.0),
                DayAggregate::new(3, 0.0, 8.0),
            ]
        );
    }

    #[test]
    fn regular_code_with_comma_value_adds_regular_hours() {
        let t = table(&["Šifra", "5 okt"], vec![row("001", &["001", "7,5"])]);
        let extraction = extract(&t).unwrap();
        assert_eq!(extraction.days, vec![DayAggregate::new(5, 7.5, 0.0)]);
    }

    #[test]
    fn unresolved_headers_are_not_day_columns() {
        let extraction = extract(&october_table()).unwrap();
        let days: Vec<u8> = extraction.day_columns.iter().map(|c| c.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn unrecognized_codes_contribute_nothing() {
        let extraction = extract(&october_table()).unwrap();
        assert!(extraction
            .anomalies
            .contains(&Anomaly::UnrecognizedWorkTypeCode {
                row: 3,
                code: "010".into()
            }));
        // the 8 sick-leave hours on day 2 are not counted
        assert_eq!(extraction.days[1].total_hours(), 8.0);
    }

    #[test]
    fn malformed_cells_are_reported_and_skipped() {
        let t = table(
            &["Šifra", "1", "2"],
            vec![row("001", &["001", "osem", "8"])],
        );
        let extraction = extract(&t).unwrap();
        assert_eq!(extraction.days, vec![DayAggregate::new(2, 8.0, 0.0)]);
        assert_eq!(
            extraction.anomalies,
            vec![Anomaly::MalformedCellValue {
                row: 0,
                day: 1,
                raw: "osem".into()
            }]
        );
    }

    #[test]
    fn summary_rows_are_skipped() {
        let t = table(
            &["Projekt", "1"],
            vec![row("001", &["P-1", "8"]), row("001", &["Vsota", "8"])],
        );
        let extraction = extract(&t).unwrap();
        assert_eq!(extraction.days, vec![DayAggregate::new(1, 8.0, 0.0)]);
    }

    #[test]
    fn days_without_hours_are_not_emitted() {
        let t = table(&["Šifra", "1", "2"], vec![row("001", &["001", "", "0"])]);
        assert!(extract(&t).unwrap().days.is_empty());
    }

    #[test]
    fn rows_without_code_are_ignored() {
        let t = RawTable {
            headers: vec![HeaderCell::text("1")],
            rows: vec![RawRow::new(None::<String>, vec!["8".into()])],
        };
        assert!(extract(&t).unwrap().days.is_empty());
    }

    #[test]
    fn duplicate_and_out_of_range_columns_are_reported() {
        let t = table(&["1", "1 okt", "45"], vec![row("001", &["4", "4", "4"])]);
        let extraction = extract(&t).unwrap();
        assert_eq!(extraction.days, vec![DayAggregate::new(1, 4.0, 0.0)]);
        assert_eq!(
            extraction.anomalies,
            vec![
                Anomaly::DuplicateDayColumn { column: 1, day: 1 },
                Anomaly::DayOutOfRange {
                    column: 2,
                    number: 45
                },
            ]
        );
    }

    #[test]
    fn missing_header_is_no_table() {
        let t = RawTable::default();
        assert_eq!(extract(&t).unwrap_err(), ExtractError::NoTableFound);
    }

    #[test]
    fn header_without_days_is_no_day_columns() {
        let t = table(&["Projekt", "Naziv"], vec![row("001", &["P-1", "x"])]);
        assert_eq!(extract(&t).unwrap_err(), ExtractError::NoDayColumnsResolved);
    }

    #[test]
    fn extraction_is_idempotent() {
        let t = october_table();
        assert_eq!(extract(&t).unwrap(), extract(&t).unwrap());
    }
}
