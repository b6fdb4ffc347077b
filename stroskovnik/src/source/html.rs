//! Reads the timesheet table and heading out of a saved stroškovnik page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{
    domain::ExtractError,
    extract::{self, resolve_day_columns, Extraction, HeaderCell, RawRow, RawTable},
};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Tables known to hold the timesheet, most specific first. Any other table is only used when
/// its header resolves to day columns.
static TABLE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["table#stroskovnik", "table.stroskovnik", "table.timesheet"]
        .into_iter()
        .map(selector)
        .collect()
});
static ANY_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static HEADER_ROW: LazyLock<Selector> = LazyLock::new(|| selector("thead tr"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static INPUT: LazyLock<Selector> = LazyLock::new(|| selector("input, textarea"));
static SELECTED_OPTION: LazyLock<Selector> =
    LazyLock::new(|| selector("select option[selected]"));
static HEADING_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [".stroskovnik-title", "h1", "h2", "title"]
        .into_iter()
        .map(selector)
        .collect()
});

/// Work-type indicator lookups inside a row, most specific first.
static CODE_ATTRIBUTE: LazyLock<Selector> = LazyLock::new(|| selector("[data-work-type]"));
static CODE_CELL: LazyLock<Selector> =
    LazyLock::new(|| selector(".sifra-vrste-dela, .work-type-code, .work-type"));
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}$").unwrap());
static CODE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(šifra|sifra)\s+vrste").unwrap());

/// Column holding the work-type code when nothing else marks it.
const POSITIONAL_CODE_COLUMN: usize = 2;

/// A parsed page: the heading text and the timesheet table, when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesheetPage {
    heading: Option<String>,
    table: Option<RawTable>,
}

impl TimesheetPage {
    pub fn new(heading: Option<String>, table: Option<RawTable>) -> Self {
        Self { heading, table }
    }

    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let heading = find_heading(&document);
        let table = find_table(&document).map(read_table);

        match &table {
            Some(t) => tracing::debug!(
                headers = t.headers.len(),
                rows = t.rows.len(),
                "found timesheet table"
            ),
            None => tracing::debug!("page has no timesheet table"),
        }

        Self { heading, table }
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn table(&self) -> Option<&RawTable> {
        self.table.as_ref()
    }

    /// Run the extractor over the page's table.
    pub fn extract(&self) -> Result<Extraction, ExtractError> {
        match &self.table {
            Some(table) => extract::extract(table),
            None => Err(ExtractError::NoTableFound),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// The entry of a cell: an input's value when the cell is editable, its text otherwise.
fn cell_value(cell: ElementRef<'_>) -> String {
    if let Some(input) = cell.select(&INPUT).next() {
        if let Some(value) = input.value().attr("value") {
            return value.trim().to_string();
        }
        return element_text(input);
    }
    if let Some(option) = cell.select(&SELECTED_OPTION).next() {
        return option
            .value()
            .attr("value")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| element_text(option));
    }
    element_text(cell)
}

fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect()
}

fn find_heading(document: &Html) -> Option<String> {
    HEADING_SELECTORS.iter().find_map(|sel| {
        document
            .select(sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

fn header_row<'a>(table: ElementRef<'a>) -> Option<ElementRef<'a>> {
    table
        .select(&HEADER_ROW)
        .next()
        .or_else(|| table.select(&ROW).next())
}

fn header_cells(row: ElementRef<'_>) -> Vec<HeaderCell> {
    cells(row)
        .into_iter()
        .map(|cell| HeaderCell::new(element_text(cell), cell.inner_html()))
        .collect()
}

fn find_table(document: &Html) -> Option<ElementRef<'_>> {
    for sel in TABLE_SELECTORS.iter() {
        if let Some(table) = document.select(sel).next() {
            return Some(table);
        }
    }

    document.select(&ANY_TABLE).find(|table| {
        header_row(*table).is_some_and(|row| {
            let (day_columns, _) = resolve_day_columns(&header_cells(row));
            !day_columns.is_empty()
        })
    })
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "thead")
}

fn read_table(table: ElementRef<'_>) -> RawTable {
    let Some(header) = header_row(table) else {
        return RawTable::default();
    };
    let headers = header_cells(header);
    let code_column = headers
        .iter()
        .position(|cell| CODE_HEADER.is_match(&cell.text));

    let rows = table
        .select(&ROW)
        .filter(|row| *row != header && !in_thead(*row))
        .map(|row| {
            let row_cells = cells(row);
            let values: Vec<String> = row_cells.iter().map(|cell| cell_value(*cell)).collect();
            let code = work_type_code(row, &values, code_column);
            RawRow { code, cells: values }
        })
        .collect();

    RawTable { headers, rows }
}

fn work_type_code(
    row: ElementRef<'_>,
    values: &[String],
    code_column: Option<usize>,
) -> Option<String> {
    let tagged = std::iter::once(row).chain(row.select(&CODE_ATTRIBUTE));
    for el in tagged {
        if let Some(code) = el.value().attr("data-work-type") {
            return Some(code.trim().to_string());
        }
    }
    if let Some(cell) = row.select(&CODE_CELL).next() {
        let code = cell_value(cell);
        if !code.is_empty() {
            return Some(code);
        }
    }
    if let Some(code) = code_column.and_then(|column| values.get(column)) {
        if !code.is_empty() {
            return Some(code.clone());
        }
    }
    values
        .get(POSITIONAL_CODE_COLUMN)
        .filter(|value| CODE_PATTERN.is_match(value))
        .cloned()
}
