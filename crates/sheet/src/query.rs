//! Read-only queries over a loaded [`Book`].
//!
//! Two lookup policies apply. Operations that address a
//! concrete cell (`get_cell` and everything built on it) report a missing
//! sheet or an out-of-bounds position as an error. Operations that scan
//! (`find_by_value`, the column projections) treat a missing sheet as an
//! empty grid and tolerate short rows.

use crate::a1_notation::{self, CellIndex};
use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{QueryError, Result};
use indexmap::IndexMap;

/// One table row keyed by header text, in header order
pub type Record = IndexMap<String, CellValue>;

/// A rectangular block of values, outer = rows, inner = columns
pub type Grid = Vec<Vec<CellValue>>;

/// Query engine over an immutable workbook
#[derive(Debug, Clone)]
pub struct QueryEngine {
    book: Book,
}

impl QueryEngine {
    /// Wrap a loaded book
    #[must_use]
    pub fn new(book: Book) -> Self {
        QueryEngine { book }
    }

    /// The underlying book
    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Sheet names in workbook order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.book.sheet_names()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.book.has_sheet(sheet)
    }

    fn rows_or_empty(&self, sheet: &str) -> &[Vec<CellValue>] {
        self.book
            .sheet(sheet)
            .map_or(&[][..], |s| s.data().as_slice())
    }

    // ===== Cell Access =====

    /// Value at a 0-based position
    pub fn get_cell(&self, sheet: &str, row: usize, col: usize) -> Result<&CellValue> {
        self.book.get_sheet(sheet)?.get(row, col)
    }

    /// Value at an A1-style reference such as "B3"
    pub fn get_cell_by_reference(&self, sheet: &str, reference: &str) -> Result<&CellValue> {
        let (row, col) = a1_notation::resolve_cell(reference)?;
        self.get_cell(sheet, row, col)
    }

    // ===== Search =====

    /// Every position whose value equals `target`, scanning row by row.
    ///
    /// A missing sheet yields no matches.
    pub fn find_by_value(&self, sheet: &str, target: &CellValue) -> Vec<CellIndex> {
        self.book
            .sheet(sheet)
            .map(|s| s.find(target))
            .unwrap_or_default()
    }

    /// Value found at `(row_offset, col_offset)` from the first match of
    /// `search_value`.
    ///
    /// Returns `Ok(None)` when nothing matches. A match whose offset points
    /// outside the grid is an `IndexOutOfRange` error.
    pub fn get_adjacent_value(
        &self,
        sheet: &str,
        search_value: &CellValue,
        row_offset: isize,
        col_offset: isize,
    ) -> Result<Option<&CellValue>> {
        let Some(&anchor) = self.find_by_value(sheet, search_value).first() else {
            return Ok(None);
        };

        match a1_notation::offset(anchor, (row_offset, col_offset)) {
            Some((row, col)) => self.get_cell(sheet, row, col).map(Some),
            None => Err(QueryError::IndexOutOfRange {
                sheet: sheet.to_string(),
                row: anchor.0 as isize + row_offset,
                col: anchor.1 as isize + col_offset,
            }),
        }
    }

    // ===== Reshaping =====

    /// Treat row `header_row` (0-based) as field names and turn every later
    /// row into a [`Record`].
    ///
    /// Headers and values are paired by position up to the shorter of the
    /// two; surplus cells on either side are dropped. Rows made only of
    /// empty cells are skipped. When two headers render to the same text the
    /// later column's value is kept.
    pub fn extract_table_from_header(&self, sheet: &str, header_row: usize) -> Result<Vec<Record>> {
        let rows = self.rows_or_empty(sheet);
        let headers = rows
            .get(header_row)
            .ok_or_else(|| QueryError::out_of_range(sheet, header_row, 0))?;

        let records: Vec<Record> = rows[header_row + 1..]
            .iter()
            .filter(|row| !row.iter().all(CellValue::is_empty))
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .map(|(header, value)| (header.to_string(), value.clone()))
                    .collect()
            })
            .collect();

        Ok(records)
    }

    // ===== Ranges =====

    /// Rectangular block starting at `start`, bounded by either an inclusive
    /// `end` or a `(rows, cols)` `size`.
    ///
    /// Exactly one of `end` and `size` must be given. Each cell is read as by
    /// [`QueryEngine::get_cell`], so a missing sheet or a position outside
    /// the grid fails the whole call. An `end` above or left of `start`
    /// selects nothing.
    pub fn get_range(
        &self,
        sheet: &str,
        start: CellIndex,
        end: Option<CellIndex>,
        size: Option<(usize, usize)>,
    ) -> Result<Grid> {
        let (row_stop, col_stop) = match (end, size) {
            (Some((end_row, end_col)), None) => {
                (end_row.saturating_add(1), end_col.saturating_add(1))
            }
            (None, Some((rows, cols))) => {
                (start.0.saturating_add(rows), start.1.saturating_add(cols))
            }
            (Some(_), Some(_)) => {
                return Err(QueryError::InvalidArguments(
                    "provide either an end cell or a size, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(QueryError::InvalidArguments(
                    "provide either an end cell or a size".to_string(),
                ))
            }
        };

        let grid = self.book.get_sheet(sheet)?;
        (start.0..row_stop)
            .map(|row| {
                (start.1..col_stop)
                    .map(|col| grid.get(row, col).cloned())
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }

    /// Inclusive block from `start` to `end`
    pub fn get_range_to(&self, sheet: &str, start: CellIndex, end: CellIndex) -> Result<Grid> {
        self.get_range(sheet, start, Some(end), None)
    }

    /// Block of `size` `(rows, cols)` anchored at `start`
    pub fn get_range_sized(
        &self,
        sheet: &str,
        start: CellIndex,
        size: (usize, usize),
    ) -> Result<Grid> {
        self.get_range(sheet, start, None, Some(size))
    }

    /// Block addressed by A1-style range notation such as "B2:D10"
    pub fn get_range_by_reference(&self, sheet: &str, reference: &str) -> Result<Grid> {
        let (start, end) = a1_notation::resolve_range(reference)?;
        self.get_range_to(sheet, start, end)
    }

    // ===== Column Projection =====

    /// For each row from the 1-based `start_row` to the end of the sheet,
    /// the values under the given column letters.
    ///
    /// A row too short for a requested column yields `None` in that slot. A
    /// missing sheet yields no rows.
    pub fn get_columns_from_row<S: AsRef<str>>(
        &self,
        sheet: &str,
        columns: &[S],
        start_row: usize,
    ) -> Result<Vec<Vec<Option<CellValue>>>> {
        self.project_columns(sheet, columns, start_row, None)
    }

    /// Same as [`QueryEngine::get_columns_from_row`], stopping before
    /// `end_row`.
    ///
    /// `start_row` is inclusive but `end_row` is exclusive: `(2, 5)` selects
    /// rows 2, 3 and 4, and `(1, 1)` selects nothing. This differs from the
    /// inclusive `end` of [`QueryEngine::get_range`].
    pub fn get_columns_from_row_to_row<S: AsRef<str>>(
        &self,
        sheet: &str,
        columns: &[S],
        start_row: usize,
        end_row: usize,
    ) -> Result<Vec<Vec<Option<CellValue>>>> {
        self.project_columns(sheet, columns, start_row, Some(end_row))
    }

    fn project_columns<S: AsRef<str>>(
        &self,
        sheet: &str,
        columns: &[S],
        start_row: usize,
        end_row: Option<usize>,
    ) -> Result<Vec<Vec<Option<CellValue>>>> {
        let col_indices = columns
            .iter()
            .map(|letters| a1_notation::column_letters_to_index(letters.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let start_idx = start_row.checked_sub(1).ok_or_else(|| {
            QueryError::InvalidArguments("row numbers start at 1".to_string())
        })?;
        let rows = self.rows_or_empty(sheet);
        let end_idx = match end_row {
            Some(end) => end.checked_sub(1).ok_or_else(|| {
                QueryError::InvalidArguments("row numbers start at 1".to_string())
            })?,
            None => rows.len(),
        };

        let projected: Vec<Vec<Option<CellValue>>> = rows
            .iter()
            .take(end_idx)
            .skip(start_idx)
            .map(|row| {
                col_indices
                    .iter()
                    .map(|&col| row.get(col).cloned())
                    .collect()
            })
            .collect();

        Ok(projected)
    }
}
