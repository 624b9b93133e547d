//! Workbook loading through calamine (xlsx, xlsm, xlsb, xls, ods).

use crate::book::Book;
use crate::cell::CellValue;
use crate::csv::CsvOptions;
use crate::error::{QueryError, Result};
use crate::query::QueryEngine;
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info};

/// Options for reading workbook files
#[derive(Debug, Clone)]
pub struct WorkbookReadOptions {
    /// Pad the used range with empty cells so grid index (0, 0) is cell A1
    pub anchor_at_a1: bool,
    /// Leave sheets without any used cell out of the book
    pub skip_empty_sheets: bool,
}

impl Default for WorkbookReadOptions {
    fn default() -> Self {
        WorkbookReadOptions {
            anchor_at_a1: true,
            skip_empty_sheets: false,
        }
    }
}

impl WorkbookReadOptions {
    /// Set whether the grid is anchored at A1
    #[must_use]
    pub fn with_anchor_at_a1(mut self, anchor_at_a1: bool) -> Self {
        self.anchor_at_a1 = anchor_at_a1;
        self
    }

    /// Set whether empty sheets are skipped
    #[must_use]
    pub fn with_skip_empty_sheets(mut self, skip: bool) -> Self {
        self.skip_empty_sheets = skip;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel serial date: days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn workbook_error(path: &Path, e: impl std::fmt::Display) -> QueryError {
    QueryError::Workbook(format!("{}: {e}", path.display()))
}

/// Materialize a calamine range as rows, optionally padded back to A1
fn range_to_rows(range: &Range<Data>, anchor_at_a1: bool) -> Vec<Vec<CellValue>> {
    let (row_pad, col_pad) = match range.start() {
        Some((row, col)) if anchor_at_a1 => (row as usize, col as usize),
        _ => (0, 0),
    };
    let width = col_pad + range.width();

    let mut data: Vec<Vec<CellValue>> = Vec::with_capacity(row_pad + range.height());
    data.extend((0..row_pad).map(|_| vec![CellValue::Null; width]));

    for row in range.rows() {
        let mut row_data = Vec::with_capacity(width);
        row_data.resize(col_pad, CellValue::Null);
        row_data.extend(row.iter().map(data_to_cell_value));
        data.push(row_data);
    }

    data
}

impl Book {
    /// Load every sheet of a workbook file
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_workbook_with_options(path, &WorkbookReadOptions::default())
    }

    /// Load every sheet of a workbook file with options
    pub fn from_workbook_with_options<P: AsRef<Path>>(
        path: P,
        options: &WorkbookReadOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

        let sheet_names = workbook.sheet_names();
        info!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

        let mut book = Book::new();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| workbook_error(path, e))?;

            if range.is_empty() && options.skip_empty_sheets {
                debug!(sheet = %sheet_name, "skipping empty sheet");
                continue;
            }

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = range_to_rows(&range, options.anchor_at_a1);
            debug!(
                sheet = %sheet_name,
                start = ?range.start(),
                rows = sheet.row_count(),
                cols = sheet.col_count(),
                "loaded sheet"
            );

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Get sheet names from a workbook file without loading data
    pub fn workbook_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
        Ok(workbook.sheet_names())
    }
}

impl QueryEngine {
    /// Open a file and build an engine over it.
    ///
    /// `.csv` and `.tsv` files load as a single sheet named after the file
    /// stem; anything else goes through the workbook reader.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let book = match extension.as_deref() {
            Some("csv") => Book::from_csv_with_options(path, CsvOptions::default())?,
            Some("tsv") => Book::from_csv_with_options(path, CsvOptions::tsv())?,
            _ => Book::from_workbook(path)?,
        };

        Ok(QueryEngine::new(book))
    }
}
