use std::fmt;

use super::RowCodec;
use crate::api::CellType;
use crate::error::XlsxRowsError;
use crate::model::{Cell, Row};

/// 列位置が固定された混合型の行オブジェクト
///
/// 列0が整数、列1が浮動小数点数、列2が文字列に対応します。
/// 実際の用途に合わせてフィールドを差し替えるための例示実装です。
#[derive(Debug, Clone, PartialEq)]
pub struct MixedRow {
    /// 列0（数値セルを0方向に切り捨て）
    pub int_value: i32,
    /// 列1（数値セル）
    pub float_value: f64,
    /// 列2（文字列セル）
    pub text: String,
}

impl Default for MixedRow {
    fn default() -> Self {
        Self {
            int_value: 0,
            float_value: 0.13,
            text: "this is example's data".to_string(),
        }
    }
}

impl MixedRow {
    pub fn new(int_value: i32, float_value: f64, text: impl Into<String>) -> Self {
        Self {
            int_value,
            float_value,
            text: text.into(),
        }
    }
}

fn numeric(row: &Row, col: u16, cell: &Cell) -> Result<f64, XlsxRowsError> {
    cell.numeric_value()
        .ok_or_else(|| XlsxRowsError::TypeMismatch {
            cell: row.coord(col).to_a1_notation(),
            expected: CellType::Numeric,
            found: cell.cell_type(),
        })
}

impl RowCodec for MixedRow {
    /// ワークシート行を読み込む
    ///
    /// 列0から最後のセルの列までを走査し、途中に欠けたセルがあれば行全体を
    /// 不正として失敗します。列3以降のセルは無視されます。
    /// 型が一致しないセルに出会った時点で中断し、それまでに読み込んだフィールドは残ります。
    fn decode(&mut self, row: Option<&mut Row>) -> Result<(), XlsxRowsError> {
        let row = row.ok_or(XlsxRowsError::AbsentRow)?;
        let last_col = match row.last_cell_num() {
            Some(last) if !row.is_blank() => last,
            _ => return Err(XlsxRowsError::BlankRow),
        };

        for col in 0..=last_col {
            let cell = row.cell(col).ok_or_else(|| XlsxRowsError::MissingCell {
                cell: row.coord(col).to_a1_notation(),
            })?;
            match col {
                // 0方向への切り捨て
                0 => self.int_value = numeric(row, col, cell)?.trunc() as i32,
                1 => self.float_value = numeric(row, col, cell)?,
                2 => {
                    self.text = cell
                        .string_value()
                        .ok_or_else(|| XlsxRowsError::TypeMismatch {
                            cell: row.coord(col).to_a1_notation(),
                            expected: CellType::Text,
                            found: cell.cell_type(),
                        })?
                        .to_string();
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn encode(&self, row: &mut Row) {
        row.clear();
        row.create_cell(0, CellType::Numeric)
            .set_value(self.int_value);
        row.create_cell(1, CellType::Numeric)
            .set_value(self.float_value);
        row.create_cell(2, CellType::Text)
            .set_value(self.text.as_str());
    }
}

impl fmt::Display for MixedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Datarow: [ int_value = {}, float_value = {}, text = {} ]",
            self.int_value, self.float_value, self.text
        )
    }
}
