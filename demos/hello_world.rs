//! Hello World Example
//!
//! This example creates a small workbook with two text rows, saves it as
//! `HelloWorld.xlsx` in the current directory and reads it back.

use xlsxrows::{WorkbookSession, XlsxRowsError};

fn create_hello_world(session: &mut WorkbookSession) -> Result<(), XlsxRowsError> {
    session.create_workbook();
    let slot = session.create_sheet(0, Some("Hello World"), false)?;
    let count = session.sheet_count();

    let sheet = session
        .workbook_mut()
        .sheet_mut(slot)
        .ok_or(XlsxRowsError::SheetOutOfRange { index: slot, count })?;
    let row = sheet.create_row(0);
    row.set_cell(0, "Hello");
    row.set_cell(1, "World");
    row.set_cell(2, ".. greets from the row layer.");

    // Numbers stored as text stay text
    let row = sheet.create_row(1);
    row.set_cell(0, "0.815");
    row.set_cell(1, "13");
    sheet.set_autofit(true);

    session.save_workbook("HelloWorld.xlsx")
}

fn read_hello_world(session: &mut WorkbookSession) -> Result<(), XlsxRowsError> {
    session.open_workbook("HelloWorld.xlsx")?;
    let report = session.read_sheet_as_text(0, false)?;
    for failure in &report.failures {
        eprintln!("row {}: {}", failure.row, failure.error);
    }
    Ok(())
}

fn main() -> Result<(), XlsxRowsError> {
    let mut session = WorkbookSession::new();

    create_hello_world(&mut session)?;
    println!("Wrote {}", session.file_path().display());

    read_hello_world(&mut session)?;
    print!("{}", session.render_text_rows(0, false));

    Ok(())
}
