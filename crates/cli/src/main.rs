//! # gridquery-cli
//!
//! Command-line interface for querying spreadsheet workbooks.

mod commands;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use commands::{execute, Command, ReplLine};
use gridquery_sheet::{Book, CsvOptions, QueryEngine};
use output::OutputFormat;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// gq - look up values, cells and ranges in spreadsheet workbooks
#[derive(Parser)]
#[command(name = "gq")]
#[command(author, version, about = "Query spreadsheet workbooks by value, cell and range", long_about = None)]
struct Cli {
    /// Workbook (xlsx, xlsm, xlsb, xls, ods) or CSV/TSV file to query
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// Output format (json, table)
    #[arg(short = 'o', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Read the file as delimited text with this separator
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    delimiter: Option<char>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let engine = load_engine(&cli.file, cli.delimiter)
        .with_context(|| format!("Failed to load workbook: {}", cli.file.display()))?;
    tracing::info!(sheets = engine.sheet_names().len(), "workbook ready");

    match cli.command {
        Command::Repl => run_repl(&engine, cli.format),
        command => {
            let output = execute(&engine, &command)?;
            println!("{}", output.render(cli.format)?);
            Ok(())
        }
    }
}

/// Load the file, forcing the delimited-text reader when a delimiter is given.
fn load_engine(path: &Path, delimiter: Option<char>) -> Result<QueryEngine> {
    let Some(delimiter) = delimiter else {
        return Ok(QueryEngine::open(path)?);
    };

    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{delimiter}'");
    }
    let options = CsvOptions::default().with_delimiter(delimiter as u8);
    Ok(QueryEngine::new(Book::from_csv_with_options(path, options)?))
}

/// Run the REPL.
fn run_repl(engine: &QueryEngine, format: OutputFormat) -> Result<()> {
    println!(
        "{} {} - Interactive Mode",
        "gridquery".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Sheets: {}",
        engine.sheet_names().join(", ").yellow()
    );
    println!(
        "Type {} for commands, {} to exit\n",
        "help".yellow(),
        ":quit".yellow()
    );

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_history_path();

    // Load history if available
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = "gq> ".green().bold().to_string();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if matches!(line, ":quit" | ":q" | ":exit") {
                    break;
                }

                match ReplLine::parse_line(line) {
                    Ok(command) => match execute(engine, &command) {
                        Ok(output) => match output.render(format) {
                            Ok(text) => println!("{text}"),
                            Err(e) => println!("{} {e}", "Error:".red().bold()),
                        },
                        Err(e) => println!("{} {e}", "Error:".red().bold()),
                    },
                    // clap errors carry their own usage text, including help output
                    Err(e) => println!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Get the history file path.
fn dirs_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut p| {
        p.push("gridquery");
        let _ = std::fs::create_dir_all(&p);
        p.push("history.txt");
        p
    })
}
