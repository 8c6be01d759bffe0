//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool that reads one
//! sheet of a workbook as typed rows and prints them.

use std::process;
use xlsxrows::{DecodePolicy, SessionBuilder, XlsxRowsError};

#[derive(Debug, Clone, Copy)]
enum RowKind {
    Text,
    Numeric,
    Mixed,
}

struct Options {
    input_path: String,
    sheet: usize,
    kind: RowKind,
    use_header: bool,
    policy: DecodePolicy,
    grid: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.xlsx> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --sheet <n>          Sheet index (0-based, default 0)");
    eprintln!("  --as <kind>          Row kind: text (default), numeric, mixed");
    eprintln!("  --header             Treat row 0 as the header row");
    eprintln!("  --strict             Stop at the first row that fails to decode");
    eprintln!("  --grid               Print text/numeric rows as a rectangular grid");
    eprintln!("\nExamples:");
    eprintln!("  {} input.xlsx", program);
    eprintln!("  {} input.xlsx --sheet 1 --as numeric --header", program);
    process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(String::as_str).unwrap_or("cli_tool");
    if args.len() < 2 {
        usage(program);
    }

    let mut options = Options {
        input_path: args[1].clone(),
        sheet: 0,
        kind: RowKind::Text,
        use_header: false,
        policy: DecodePolicy::BestEffort,
        grid: false,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--sheet" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --sheet requires a value");
                    process::exit(1);
                };
                options.sheet = value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet index: {}", value);
                    process::exit(1);
                });
                i += 2;
            }
            "--as" => {
                options.kind = match args.get(i + 1).map(String::as_str) {
                    Some("text") => RowKind::Text,
                    Some("numeric") => RowKind::Numeric,
                    Some("mixed") => RowKind::Mixed,
                    other => {
                        eprintln!("Error: Invalid row kind: {:?}", other);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--header" => {
                options.use_header = true;
                i += 1;
            }
            "--strict" => {
                options.policy = DecodePolicy::Strict;
                i += 1;
            }
            "--grid" => {
                options.grid = true;
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                usage(program);
            }
        }
    }
    options
}

fn run(options: &Options) -> Result<(), XlsxRowsError> {
    let mut session = SessionBuilder::new()
        .with_decode_policy(options.policy)
        .build()?;
    session.open_workbook(&options.input_path)?;

    let slot = options.sheet;
    let report = match options.kind {
        RowKind::Text => session.read_sheet_as_text(slot, options.use_header)?,
        RowKind::Numeric => session.read_sheet_as_numeric(slot, options.use_header)?,
        RowKind::Mixed => session.read_sheet_as_mixed(slot, options.use_header)?,
    };

    match (options.kind, options.grid) {
        (RowKind::Text, true) => {
            for row in session.text_rows_as_grid().iter_rows() {
                println!("{}", row.join("\t"));
            }
        }
        (RowKind::Numeric, true) => {
            for row in session.numeric_rows_as_grid().iter_rows() {
                let cells: Vec<String> = row.iter().map(f64::to_string).collect();
                println!("{}", cells.join("\t"));
            }
        }
        (RowKind::Text, false) => print!("{}", session.render_text_rows(slot, options.use_header)),
        (RowKind::Numeric, false) => {
            print!("{}", session.render_numeric_rows(slot, options.use_header))
        }
        (RowKind::Mixed, _) => print!("{}", session.render_mixed_rows(slot, options.use_header)),
    }

    eprintln!(
        "{} rows read, {} failed",
        report.rows_read,
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("  row {}: {}", failure.row, failure.error);
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
