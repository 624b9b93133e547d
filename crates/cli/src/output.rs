//! Rendering of query results as text tables or JSON.

use anyhow::Result;
use gridquery_sheet::{to_a1_notation, CellIndex, CellValue, Grid, Record};
use indexmap::IndexSet;
use serde_json::json;

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Tab-separated table output (default)
    #[default]
    Table,
}

/// The result of one query command.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// `(name, rows, columns)` per sheet, in workbook order
    Sheets(Vec<(String, usize, usize)>),
    Value(Option<CellValue>),
    Matches(Vec<CellIndex>),
    Grid(Grid),
    Records(Vec<Record>),
    /// Column projections; `None` marks a row too short to reach the column
    Columns {
        columns: Vec<String>,
        rows: Vec<Vec<Option<CellValue>>>,
    },
}

impl Output {
    /// Render the result in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.to_json()?)?),
            OutputFormat::Table => Ok(self.to_table()),
        }
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            Output::Sheets(sheets) => sheets
                .iter()
                .map(|(name, rows, cols)| json!({ "name": name, "rows": rows, "cols": cols }))
                .collect(),
            Output::Value(value) => serde_json::to_value(value)?,
            Output::Matches(matches) => matches
                .iter()
                .map(|&(row, col)| {
                    json!({ "cell": to_a1_notation(row, col), "row": row, "col": col })
                })
                .collect(),
            Output::Grid(grid) => serde_json::to_value(grid)?,
            Output::Records(records) => serde_json::to_value(records)?,
            Output::Columns { columns, rows } => rows
                .iter()
                .map(|row| projection_json(columns, row))
                .collect::<Result<serde_json::Value>>()?,
        };
        Ok(value)
    }

    fn to_table(&self) -> String {
        match self {
            Output::Sheets(sheets) => sheets
                .iter()
                .map(|(name, rows, cols)| format!("{name}\t{rows}x{cols}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Output::Value(Some(value)) => value.to_string(),
            Output::Value(None) => "(no match)".to_string(),
            Output::Matches(matches) if matches.is_empty() => "(no matches)".to_string(),
            Output::Matches(matches) => matches
                .iter()
                .map(|&(row, col)| to_a1_notation(row, col))
                .collect::<Vec<_>>()
                .join("\n"),
            Output::Grid(grid) => grid
                .iter()
                .map(|row| join_row(row.iter().map(ToString::to_string)))
                .collect::<Vec<_>>()
                .join("\n"),
            Output::Records(records) => records_table(records),
            Output::Columns { rows, .. } => rows
                .iter()
                .map(|row| {
                    join_row(
                        row.iter()
                            .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default()),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One projected row as an object keyed by column letter. Cells past the
/// end of a short row are left out, so they stay distinct from empty cells.
fn projection_json(columns: &[String], row: &[Option<CellValue>]) -> Result<serde_json::Value> {
    let mut object = serde_json::Map::new();
    for (column, cell) in columns.iter().zip(row) {
        if let Some(cell) = cell {
            object.insert(column.clone(), serde_json::to_value(cell)?);
        }
    }
    Ok(serde_json::Value::Object(object))
}

fn join_row<I: Iterator<Item = String>>(cells: I) -> String {
    cells.collect::<Vec<_>>().join("\t")
}

/// Records can have different keys, so the header is every key in the
/// order first seen.
fn records_table(records: &[Record]) -> String {
    let headers: IndexSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    let mut lines = vec![join_row(headers.iter().map(|h| (*h).to_string()))];
    for record in records {
        lines.push(join_row(headers.iter().map(|header| {
            record
                .get(*header)
                .map(ToString::to_string)
                .unwrap_or_default()
        })));
    }
    lines.join("\n")
}
