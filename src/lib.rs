//! xlsxrows - Typed row objects on top of XLSX worksheets
//!
//! This crate maps worksheet rows to in-memory row objects and back. A row can be
//! read as a list of strings, a list of numbers, or a fixed-schema mixed record.
//! Missing cells inside a typed row are filled with gap values (`""` / `NaN`), cell
//! types are checked against the row's declared kind, and every sheet can carry an
//! optional header row kept in a sheet catalog.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxrows::WorkbookSession;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = WorkbookSession::new();
//!
//!     // Read the first sheet, row 0 is the header
//!     session.open_workbook("input.xlsx")?;
//!     let report = session.read_sheet_as_text(0, true)?;
//!     for failure in &report.failures {
//!         eprintln!("row {}: {}", failure.row, failure.error);
//!     }
//!
//!     print!("{}", session.render_text_rows(0, true));
//!
//!     // Write the rows back into a new sheet and save
//!     session.write_sheet_from_text(1, Some("copy"), false)?;
//!     session.save_workbook("output.xlsx")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxrows::{DecodePolicy, SessionBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = SessionBuilder::new()
//!         .with_base_dir("data")
//!         .with_file_name("numbers.xlsx")
//!         .with_decode_policy(DecodePolicy::Strict)  // Abort on the first bad row
//!         .with_autofit(true)
//!         .build()?;
//!
//!     session.reopen_workbook()?;
//!     session.read_sheet_as_numeric(0, false)?;
//!     Ok(())
//! }
//! ```
//!
//! # Arrays
//!
//! ```rust,no_run
//! use xlsxrows::{Grid, WorkbookSession};
//!
//! # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
//! let mut session = WorkbookSession::new();
//! let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! session.set_numeric_rows_from_grid(&grid);
//! session.write_sheet_from_numeric(0, Some("numbers"), false)?;
//! session.save_workbook("numbers.xlsx")?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod catalog;
mod codec;
mod error;
mod grid;
mod model;
mod output;
mod parser;
mod session;
mod types;

// 公開API
pub use api::{CellType, DecodePolicy};
pub use builder::{SessionBuilder, SessionConfig, DEFAULT_FILE_NAME, DEFAULT_MAX_INPUT_FILE_SIZE};
pub use catalog::{SheetCatalog, SheetEntry};
pub use codec::{CellKind, DecodeStats, MixedRow, NumericRow, RowCodec, TextRow, TypedRow};
pub use error::XlsxRowsError;
pub use grid::Grid;
pub use model::{Cell, Row, Sheet, Workbook};
pub use session::{ReadReport, RowFailure, WorkbookSession};
pub use types::CellValue;
