//! Workbook Parser
//!
//! calamineのラッパーとして、XLSXファイル全体をワークブックモデルに読み込みます。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read};

use crate::error::XlsxRowsError;
use crate::model::{Sheet, Workbook};
use crate::types::CellValue;

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込んでからcalamineで開きます。
/// ファイルハンドルは`open`の呼び出し中だけ保持されます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー
    /// * `max_input_file_size` - 読み込みを許可する最大バイト数
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxRowsError::InputTooLarge)` - 入力が上限サイズを超えた場合
    /// * `Err(XlsxRowsError::Parse)` - calamineが解析に失敗した場合
    /// * `Err(XlsxRowsError::Config)` - XLSX以外の形式だった場合
    pub fn open<R: Read>(reader: R, max_input_file_size: u64) -> Result<Self, XlsxRowsError> {
        // 上限 + 1バイトまで読み、超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > max_input_file_size {
            return Err(XlsxRowsError::InputTooLarge {
                size: bytes_read as u64,
                max: max_input_file_size,
            });
        }

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(XlsxRowsError::Parse)?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxRowsError::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// すべてのシートを読み込み、ワークブックモデルを構築する
    ///
    /// 値を持つセルだけが行に登録され、空セルはギャップとして扱われます。
    pub fn read_workbook(&mut self) -> Result<Workbook, XlsxRowsError> {
        let mut workbook = Workbook::new();
        for name in self.sheet_names() {
            let sheet = self.read_sheet(&name)?;
            workbook.push_sheet(sheet);
        }
        Ok(workbook)
    }

    fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, XlsxRowsError> {
        // 1. シートの取得
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| XlsxRowsError::Parse(e.into()))?;

        let mut sheet = Sheet::new(sheet_name);

        // 2. 空のシートは範囲を持たない
        let Some((start_row, start_col)) = range.start() else {
            return Ok(sheet);
        };

        // 3. 値を持つセルの抽出（座標は範囲の左上からの相対位置）
        for (row_offset, col_offset, data) in range.used_cells() {
            let Some(value) = convert_data(data) else {
                continue;
            };
            let row_num = start_row + row_offset as u32;
            let col = match u16::try_from(start_col as usize + col_offset) {
                Ok(col) => col,
                Err(_) => {
                    log::warn!(
                        "sheet '{}': cell at row {} column {} is beyond the column limit",
                        sheet_name,
                        row_num,
                        start_col as usize + col_offset
                    );
                    continue;
                }
            };
            sheet.get_or_create_row(row_num).set_cell(col, value);
        }

        log::debug!(
            "sheet '{}': {} rows with content",
            sheet_name,
            sheet.row_count()
        );
        Ok(sheet)
    }
}

/// calamineのセルデータをセル値に変換する（空セルは`None`）
fn convert_data(data: &Data) -> Option<CellValue> {
    let value = match data {
        Data::Int(i) => CellValue::Numeric(*i as f64),
        Data::Float(f) => CellValue::Numeric(*f),
        // 日付はシリアル値（数値セル）として扱う
        Data::DateTime(dt) => CellValue::Numeric(dt.as_f64()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => return None,
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CellType;
    use crate::model::Cell;

    fn fixture() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("first").unwrap();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 2, "value").unwrap();
        sheet.write_number(1, 0, 1.5).unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        sheet.write_number(3, 2, -4.0).unwrap();

        let empty = workbook.add_worksheet();
        empty.set_name("empty").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_read_workbook() {
        let mut parser = WorkbookParser::open(Cursor::new(fixture()), u64::MAX).unwrap();
        assert_eq!(parser.sheet_names(), vec!["first", "empty"]);

        let workbook = parser.read_workbook().unwrap();
        assert_eq!(workbook.sheet_count(), 2);

        let sheet = workbook.sheet(0).unwrap();
        assert_eq!(sheet.name(), "first");
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.last_row_num(), Some(3));
        assert!(sheet.row(2).is_none());

        let header = sheet.row(0).unwrap();
        assert_eq!(header.cell(0).and_then(Cell::string_value), Some("name"));
        assert!(header.cell(1).is_none());
        assert_eq!(header.cell(2).and_then(Cell::string_value), Some("value"));

        let data = sheet.row(1).unwrap();
        assert_eq!(data.cell(0).and_then(Cell::numeric_value), Some(1.5));
        assert_eq!(data.cell(1).map(Cell::cell_type), Some(CellType::Bool));

        assert_eq!(
            sheet.row(3).and_then(|r| r.cell(2)).and_then(Cell::numeric_value),
            Some(-4.0)
        );

        assert_eq!(workbook.sheet(1).unwrap().row_count(), 0);
    }

    #[test]
    fn test_open_rejects_oversized_input() {
        let data = fixture();
        let max = data.len() as u64 - 1;
        match WorkbookParser::open(Cursor::new(data), max) {
            Err(XlsxRowsError::InputTooLarge { max: limit, .. }) => assert_eq!(limit, max),
            _ => panic!("Expected InputTooLarge error"),
        }
    }

    #[test]
    fn test_open_invalid_input() {
        let result = WorkbookParser::open(Cursor::new(b"not a workbook".to_vec()), u64::MAX);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_data() {
        assert_eq!(convert_data(&Data::Int(3)), Some(CellValue::Numeric(3.0)));
        assert_eq!(
            convert_data(&Data::String("a".to_string())),
            Some(CellValue::Text("a".to_string()))
        );
        assert_eq!(convert_data(&Data::Empty), None);
    }
}
