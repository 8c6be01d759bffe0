//! Output Module
//!
//! rust_xlsxwriterを使用して、ワークブックモデルをXLSXファイルとして書き出すモジュール。

use std::path::Path;

use crate::error::XlsxRowsError;
use crate::model::{Sheet, Workbook};
use crate::types::CellValue;

/// XLSX出力
///
/// 書き込み時のセルの扱い:
///
/// - 文字列 -> 文字列セル（空文字列はギャップとして書き込まない）
/// - 有限の数値 -> 数値セル（`NaN`・無限大はギャップとして書き込まない）
/// - 論理値 -> 論理値セル
/// - エラー値 -> その表記の文字列セル
/// - 空セル -> 書き込まない
///
/// 書き込まなかった位置は、読み込み時の行デコードで補完値として復元されます。
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct XlsxWriter {
    /// すべてのシートの列幅を内容に合わせる
    autofit: bool,
}

impl XlsxWriter {
    pub fn new(autofit: bool) -> Self {
        Self { autofit }
    }

    /// ワークブックをファイルに保存する
    ///
    /// ファイルは保存処理の間だけ開かれます。
    pub fn save(&self, workbook: &Workbook, path: &Path) -> Result<(), XlsxRowsError> {
        let mut xlsx = self.build(workbook)?;
        xlsx.save(path)?;
        Ok(())
    }

    /// ワークブックをメモリ上のバイト列に書き出す
    pub fn save_to_buffer(&self, workbook: &Workbook) -> Result<Vec<u8>, XlsxRowsError> {
        let mut xlsx = self.build(workbook)?;
        Ok(xlsx.save_to_buffer()?)
    }

    fn build(&self, workbook: &Workbook) -> Result<rust_xlsxwriter::Workbook, XlsxRowsError> {
        let mut xlsx = rust_xlsxwriter::Workbook::new();

        // XLSXは少なくとも1つのシートを必要とする
        if workbook.sheet_count() == 0 {
            xlsx.add_worksheet();
            return Ok(xlsx);
        }

        for sheet in workbook.sheets() {
            let worksheet = xlsx.add_worksheet();
            self.write_sheet(sheet, worksheet)?;
        }

        Ok(xlsx)
    }

    fn write_sheet(
        &self,
        sheet: &Sheet,
        worksheet: &mut rust_xlsxwriter::Worksheet,
    ) -> Result<(), XlsxRowsError> {
        worksheet.set_name(sheet.name())?;

        for row in sheet.rows() {
            let row_num = row.row_num();
            for (col, cell) in row.cells() {
                match cell.value() {
                    CellValue::Text(s) if !s.is_empty() => {
                        worksheet.write_string(row_num, col, s)?;
                    }
                    CellValue::Numeric(n) if n.is_finite() => {
                        worksheet.write_number(row_num, col, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col, *b)?;
                    }
                    CellValue::Error(e) => {
                        worksheet.write_string(row_num, col, e)?;
                    }
                    CellValue::Text(_) | CellValue::Numeric(_) | CellValue::Blank => {}
                }
            }
        }

        if self.autofit || sheet.autofit() {
            worksheet.autofit();
        }

        log::debug!(
            "sheet '{}': wrote {} rows",
            sheet.name(),
            sheet.row_count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::WorkbookParser;
    use std::io::Cursor;

    fn reload(workbook: &Workbook) -> Workbook {
        let buffer = XlsxWriter::default().save_to_buffer(workbook).unwrap();
        WorkbookParser::open(Cursor::new(buffer), u64::MAX)
            .unwrap()
            .read_workbook()
            .unwrap()
    }

    #[test]
    fn test_write_and_reload() {
        let mut workbook = Workbook::new();
        let index = workbook.create_sheet("numbers");
        let sheet = workbook.sheet_mut(index).unwrap();
        let row = sheet.create_row(0);
        row.set_cell(0, 1.0);
        row.set_cell(1, f64::NAN);
        row.set_cell(2, 3.0);
        sheet.create_row(2).set_cell(0, "text");
        sheet.set_autofit(true);

        let loaded = reload(&workbook);
        let sheet = loaded.sheet(0).unwrap();
        assert_eq!(sheet.name(), "numbers");

        let row = sheet.row(0).unwrap();
        assert_eq!(row.cell_count(), 2);
        assert!(row.cell(1).is_none());
        assert_eq!(
            sheet.row(2).and_then(|r| r.cell(0)).and_then(|c| c.string_value()),
            Some("text")
        );
    }

    #[test]
    fn test_empty_workbook_gets_default_sheet() {
        let loaded = reload(&Workbook::new());
        assert_eq!(loaded.sheet_count(), 1);
        assert_eq!(loaded.sheet(0).unwrap().row_count(), 0);
    }

    #[test]
    fn test_invalid_sheet_name_is_error() {
        let mut workbook = Workbook::new();
        workbook.create_sheet("bad/name");
        assert!(matches!(
            XlsxWriter::new(true).save_to_buffer(&workbook),
            Err(XlsxRowsError::Write(_))
        ));
    }
}
