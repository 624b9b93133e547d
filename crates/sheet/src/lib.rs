//! Read-only queries over spreadsheet workbooks
//!
//! A [`Book`] maps sheet names to ragged 2D grids of [`CellValue`]s. A
//! [`QueryEngine`] wraps a book and answers lookups addressed either by
//! 0-based `(row, col)` indices or by A1-style references such as `"B3"` and
//! `"A1:C10"`.
//!
//! # Examples
//!
//! ## Querying an in-memory book
//!
//! ```
//! use gridquery_sheet::{Book, CellValue, QueryEngine, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Name", "Age"],
//!     vec!["Alice", "30"],
//!     vec!["Bob", "25"],
//! ]);
//! let engine = QueryEngine::new(Book::from_sheets([("People", sheet)]).unwrap());
//!
//! assert_eq!(engine.get_cell("People", 1, 0).unwrap().as_str(), "Alice");
//! assert_eq!(engine.find_by_value("People", &CellValue::from("Bob")), vec![(2, 0)]);
//!
//! let age = engine
//!     .get_adjacent_value("People", &CellValue::from("Bob"), 0, 1)
//!     .unwrap();
//! assert_eq!(age, Some(&CellValue::from("25")));
//! ```
//!
//! ## Ranges and records
//!
//! ```
//! use gridquery_sheet::{Book, QueryEngine, Sheet};
//!
//! let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);
//! let engine = QueryEngine::new(Book::from_sheets([("Data", sheet)]).unwrap());
//!
//! let block = engine.get_range_by_reference("Data", "B1:C2").unwrap();
//! assert_eq!(block.len(), 2);
//! assert_eq!(block[1][1].as_int(), Some(6));
//!
//! let records = engine.extract_table_from_header("Data", 0).unwrap();
//! assert_eq!(records[0]["1"].as_int(), Some(4));
//! ```
//!
//! ## Loading from a file
//!
//! ```no_run
//! use gridquery_sheet::QueryEngine;
//!
//! let engine = QueryEngine::open("report.xlsx").unwrap();
//! let totals = engine.get_columns_from_row("Summary", &["A", "D"], 2).unwrap();
//! ```

pub mod a1_notation;
mod book;
mod cell;
mod csv;
mod error;
mod query;
mod sheet;
mod workbook;

/// Re-export reference resolution helpers.
pub use a1_notation::{
    column_index_to_letters, column_letters_to_index, offset, resolve_cell, resolve_range,
    to_a1_notation, CellIndex,
};
/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export error types.
pub use error::{QueryError, Result};
/// Re-export the query engine and its result types.
pub use query::{Grid, QueryEngine, Record};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export workbook read options.
pub use workbook::WorkbookReadOptions;
