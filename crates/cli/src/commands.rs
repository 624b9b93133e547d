//! Query subcommands shared by one-shot invocations and the REPL.

use crate::output::Output;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use gridquery_sheet::{CellValue, QueryEngine};

/// A single query against the loaded workbook.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List sheets with their row and column counts
    Sheets,

    /// Show the value at a cell reference (e.g. B3)
    Cell {
        sheet: String,
        reference: String,
    },

    /// List every cell holding a value
    Find {
        sheet: String,
        value: String,
        /// Match the value as literal text instead of inferring its type
        #[arg(long)]
        text: bool,
    },

    /// Show the value next to the first cell holding a value
    Adjacent {
        sheet: String,
        value: String,
        /// Row offset from the match
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        rows: isize,
        /// Column offset from the match
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        cols: isize,
        /// Match the value as literal text instead of inferring its type
        #[arg(long)]
        text: bool,
    },

    /// Read rows below a header row as records
    Table {
        sheet: String,
        /// Header row number (1-based)
        #[arg(long, default_value_t = 1)]
        header_row: usize,
    },

    /// Show a rectangular range (e.g. A1:C10)
    Range {
        sheet: String,
        reference: String,
    },

    /// Project columns (e.g. A C) from a starting row
    Columns {
        sheet: String,
        #[arg(required = true)]
        columns: Vec<String>,
        /// First row number, inclusive (1-based)
        #[arg(long)]
        start: usize,
        /// Row number to stop before (exclusive)
        #[arg(long)]
        end: Option<usize>,
    },

    /// Start an interactive session
    Repl,
}

/// Parser for one REPL line, which carries only a subcommand.
#[derive(Debug, Parser)]
#[command(name = "gq", no_binary_name = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: Command,
}

impl ReplLine {
    /// Parse a REPL input line into a command.
    pub fn parse_line(line: &str) -> Result<Command> {
        let words = split_words(line)?;
        Ok(ReplLine::try_parse_from(words)?.command)
    }
}

/// Split a line on whitespace, keeping double-quoted text together.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote in: {line}");
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

/// Run a query command against the engine.
pub fn execute(engine: &QueryEngine, command: &Command) -> Result<Output> {
    tracing::debug!(?command, "executing");

    let output = match command {
        Command::Sheets => Output::Sheets(
            engine
                .book()
                .sheets()
                .map(|(name, sheet)| (name.to_string(), sheet.row_count(), sheet.col_count()))
                .collect(),
        ),
        Command::Cell { sheet, reference } => {
            Output::Value(Some(engine.get_cell_by_reference(sheet, reference)?.clone()))
        }
        Command::Find { sheet, value, text } => {
            warn_unknown_sheet(engine, sheet);
            Output::Matches(engine.find_by_value(sheet, &search_value(value, *text)))
        }
        Command::Adjacent {
            sheet,
            value,
            rows,
            cols,
            text,
        } => {
            warn_unknown_sheet(engine, sheet);
            Output::Value(
                engine
                    .get_adjacent_value(sheet, &search_value(value, *text), *rows, *cols)?
                    .cloned(),
            )
        }
        Command::Table { sheet, header_row } => {
            let Some(header_idx) = header_row.checked_sub(1) else {
                bail!("Header row numbers start at 1");
            };
            Output::Records(engine.extract_table_from_header(sheet, header_idx)?)
        }
        Command::Range { sheet, reference } => {
            Output::Grid(engine.get_range_by_reference(sheet, reference)?)
        }
        Command::Columns {
            sheet,
            columns,
            start,
            end,
        } => {
            warn_unknown_sheet(engine, sheet);
            let rows = match end {
                Some(end) => engine.get_columns_from_row_to_row(sheet, columns, *start, *end)?,
                None => engine.get_columns_from_row(sheet, columns, *start)?,
            };
            Output::Columns {
                columns: columns.clone(),
                rows,
            }
        }
        Command::Repl => bail!("Already in interactive mode"),
    };

    Ok(output)
}

fn search_value(value: &str, text: bool) -> CellValue {
    if text {
        CellValue::from(value)
    } else {
        CellValue::parse(value)
    }
}

/// Scanning queries answer an unknown sheet with an empty result; say so
/// in the log.
fn warn_unknown_sheet(engine: &QueryEngine, sheet: &str) {
    if !engine.has_sheet(sheet) {
        tracing::warn!(sheet, "sheet not found, treating as empty");
    }
}
