use super::HeaderCell;

/// Read access to a timesheet table, independent of where it was scraped from.
///
/// Column indices address header cells and body cells alike.
pub trait TableSource {
    fn header_cells(&self) -> &[HeaderCell];

    fn row_count(&self) -> usize;

    /// Text of the first cell of a row, used to recognise summary rows.
    fn row_label(&self, row: usize) -> Option<&str>;

    /// The row's work-type indicator, e.g. `"001"`.
    fn work_type_code(&self, row: usize) -> Option<&str>;

    /// Raw entry of a row/column intersection.
    fn cell(&self, row: usize, column: usize) -> Option<&str>;
}

/// An in-memory table snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub code: Option<String>,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(code: Option<impl Into<String>>, cells: Vec<String>) -> Self {
        Self {
            code: code.map(Into::into),
            cells,
        }
    }
}

impl TableSource for RawTable {
    fn header_cells(&self) -> &[HeaderCell] {
        &self.headers
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_label(&self, row: usize) -> Option<&str> {
        self.rows.get(row)?.cells.first().map(String::as_str)
    }

    fn work_type_code(&self, row: usize) -> Option<&str> {
        self.rows.get(row)?.code.as_deref()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.cells.get(column).map(String::as_str)
    }
}
