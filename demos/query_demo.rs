//! Walk through the query engine on a small in-memory book.
//!
//! Run with: cargo run --example query_demo -p gridquery-sheet

use gridquery_sheet::{resolve_range, Book, CellValue, QueryEngine, Sheet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== gridquery demo ===\n");

    let inventory = Sheet::from_data(vec![
        vec![CellValue::from("Inventory"), CellValue::Null, CellValue::Null],
        vec![
            CellValue::from("Item"),
            CellValue::from("Qty"),
            CellValue::from("Price"),
        ],
        vec![CellValue::from("Bolt"), CellValue::Int(120), CellValue::Float(0.25)],
        vec![CellValue::from("Nut"), CellValue::Int(300), CellValue::Float(0.1)],
        vec![CellValue::Null, CellValue::Null, CellValue::Null],
        vec![CellValue::from("Washer"), CellValue::Int(75)],
    ]);
    let engine = QueryEngine::new(Book::from_sheets([("Stock", inventory)])?);

    println!("Sheets: {:?}", engine.sheet_names());
    println!("B3 = {}", engine.get_cell_by_reference("Stock", "B3")?);

    let matches = engine.find_by_value("Stock", &CellValue::from("Nut"));
    println!("'Nut' found at {matches:?}");

    let price = engine.get_adjacent_value("Stock", &CellValue::from("Nut"), 0, 2)?;
    println!("Price next to 'Nut': {price:?}");

    println!("\n--- Records below the header on row 2 ---");
    for record in engine.extract_table_from_header("Stock", 1)? {
        println!("{record:?}");
    }

    let (start, end) = resolve_range("A3:B4")?;
    println!("\n--- Range A3:B4 = {start:?}..={end:?} ---");
    for row in engine.get_range_to("Stock", start, end)? {
        println!("{row:?}");
    }

    println!("\n--- Columns A and C from row 3 ---");
    for row in engine.get_columns_from_row("Stock", &["A", "C"], 3)? {
        println!("{row:?}");
    }

    Ok(())
}
