//! 単一型の行オブジェクト
//!
//! 文字列行と数値行はセルの型以外の処理がすべて共通のため、
//! 閉じた型集合`CellKind`（`String`と`f64`）でパラメータ化した`TypedRow<T>`として実装します。

use std::fmt;

use super::{RowCodec, MAX_COLUMNS};
use crate::api::CellType;
use crate::error::XlsxRowsError;
use crate::model::{Cell, Row};
use crate::types::CellValue;

mod private {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for f64 {}
}

/// 行オブジェクトの要素型
///
/// `String`（文字列セル）と`f64`（数値セル）のみが実装します。
pub trait CellKind: Clone + PartialEq + fmt::Debug + fmt::Display + private::Sealed {
    /// この要素型に対応するセルの型タグ
    const CELL_TYPE: CellType;

    /// 欠けているセルを補完するときの値（文字列は`""`、数値は`NaN`）
    fn gap() -> Self;

    /// 矩形配列への変換で、短い行の不足分を埋める値（文字列は`""`、数値は`0.0`）
    fn padding() -> Self;

    /// セルから値を取り出す（型が一致しない場合は`None`）
    fn from_cell(cell: &Cell) -> Option<Self>;

    /// セルに書き込む値に変換
    fn into_value(self) -> CellValue;
}

impl CellKind for String {
    const CELL_TYPE: CellType = CellType::Text;

    fn gap() -> Self {
        String::new()
    }

    fn padding() -> Self {
        String::new()
    }

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.string_value().map(str::to_string)
    }

    fn into_value(self) -> CellValue {
        CellValue::Text(self)
    }
}

impl CellKind for f64 {
    const CELL_TYPE: CellType = CellType::Numeric;

    fn gap() -> Self {
        f64::NAN
    }

    fn padding() -> Self {
        0.0
    }

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.numeric_value()
    }

    fn into_value(self) -> CellValue {
        CellValue::Numeric(self)
    }
}

/// 直近のデコードで観測した行の形状（診断用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// 最初に存在したセルの列番号
    pub first_col: u16,
    /// 最後に存在したセルの列番号
    pub last_col: u16,
    /// 補完前から存在していたセルの数
    pub present_cells: usize,
}

/// 単一型のセルからなる行オブジェクト
///
/// デコード後の長さは常に「列0から最後のセルの列まで」の列数と等しく、
/// 欠けていた位置には`CellKind::gap()`の値が入ります。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedRow<T: CellKind> {
    values: Vec<T>,
    stats: Option<DecodeStats>,
}

/// 文字列セルの行
pub type TextRow = TypedRow<String>;

/// 数値セルの行
pub type NumericRow = TypedRow<f64>;

impl<T: CellKind> TypedRow<T> {
    /// 空の行オブジェクトを生成
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            stats: None,
        }
    }

    /// 値のリストから行オブジェクトを生成
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            values,
            stats: None,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<T> {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// 値をフラットな配列としてコピーする
    pub fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }

    /// 配列の値で行の内容を置き換える
    pub fn set_values(&mut self, values: &[T]) {
        self.values.clear();
        self.values.extend_from_slice(values);
    }

    /// 直近のデコードで観測した行の形状
    pub fn stats(&self) -> Option<&DecodeStats> {
        self.stats.as_ref()
    }
}

impl<T: CellKind> From<Vec<T>> for TypedRow<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: CellKind> RowCodec for TypedRow<T> {
    /// ワークシート行を読み込む
    ///
    /// 列0から最後のセルの列までを順に走査します。最初のセルより前の列も含め、
    /// 欠けている列には補完値のセルを行に作成し（読み込み元の行が変更されます）、
    /// 補完値を追加します。存在するセルの型が宣言型と異なる場合は即座に失敗し、
    /// その列の値は追加されません。
    fn decode(&mut self, row: Option<&mut Row>) -> Result<(), XlsxRowsError> {
        let row = row.ok_or(XlsxRowsError::AbsentRow)?;
        if row.is_blank() {
            return Err(XlsxRowsError::BlankRow);
        }
        let (first_col, last_col) = match (row.first_cell_num(), row.last_cell_num()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(XlsxRowsError::BlankRow),
        };

        self.values.clear();
        let mut stats = DecodeStats {
            first_col,
            last_col,
            present_cells: 0,
        };
        log::debug!(
            "row {}: first/last cell = {}, {} ({} cells)",
            row.row_num(),
            first_col,
            last_col,
            row.cell_count()
        );

        for col in 0..=last_col {
            match row.cell(col) {
                Some(cell) => {
                    stats.present_cells += 1;
                    let value = T::from_cell(cell).ok_or_else(|| XlsxRowsError::TypeMismatch {
                        cell: row.coord(col).to_a1_notation(),
                        expected: T::CELL_TYPE,
                        found: cell.cell_type(),
                    });
                    match value {
                        Ok(value) => self.values.push(value),
                        Err(e) => {
                            self.stats = Some(stats);
                            return Err(e);
                        }
                    }
                }
                None => {
                    row.create_cell(col, T::CELL_TYPE)
                        .set_value(T::gap().into_value());
                    self.values.push(T::gap());
                }
            }
        }

        log::debug!(
            "row {}: {} original cells, {} values",
            row.row_num(),
            stats.present_cells,
            self.values.len()
        );
        self.stats = Some(stats);
        Ok(())
    }

    fn encode(&self, row: &mut Row) {
        row.clear();
        if self.values.len() > MAX_COLUMNS {
            log::warn!(
                "row {}: {} values exceed the column limit, writing the first {}",
                row.row_num(),
                self.values.len(),
                MAX_COLUMNS
            );
        }
        for (col, value) in (0..=u16::MAX).zip(self.values.iter().take(MAX_COLUMNS)) {
            row.create_cell(col, T::CELL_TYPE)
                .set_value(value.clone().into_value());
        }
    }
}

impl<T: CellKind> fmt::Display for TypedRow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return f.write_str("Datarow: empty");
        }
        f.write_str("Datarow: [ ")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", value)?;
        }
        f.write_str(" ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_row(cells: &[(u16, f64)]) -> Row {
        let mut row = Row::new(0);
        for &(col, value) in cells {
            row.set_cell(col, value);
        }
        row
    }

    fn text_row(cells: &[(u16, &str)]) -> Row {
        let mut row = Row::new(0);
        for &(col, value) in cells {
            row.set_cell(col, value);
        }
        row
    }

    #[test]
    fn test_decode_numeric_fills_gaps_with_nan() {
        let mut row = numeric_row(&[(0, 1.5), (3, 4.0)]);
        let mut decoded = NumericRow::new();
        decoded.decode(Some(&mut row)).unwrap();

        let values = decoded.values();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], 1.5);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert_eq!(values[3], 4.0);

        // 補完されたセルは読み込み元の行にも作成される
        assert_eq!(row.cell_count(), 4);
        assert!(row.cell(1).and_then(Cell::numeric_value).unwrap().is_nan());

        let stats = decoded.stats().unwrap();
        assert_eq!(stats.first_col, 0);
        assert_eq!(stats.last_col, 3);
        assert_eq!(stats.present_cells, 2);
    }

    #[test]
    fn test_decode_text_synthesizes_leading_columns() {
        let mut row = text_row(&[(2, "c"), (3, "d")]);
        let mut decoded = TextRow::new();
        decoded.decode(Some(&mut row)).unwrap();

        assert_eq!(decoded.values(), &["", "", "c", "d"]);
        assert_eq!(row.first_cell_num(), Some(0));
        assert_eq!(decoded.stats().unwrap().first_col, 2);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let mut row = numeric_row(&[(0, 1.0), (1, 2.0)]);
        row.set_cell(2, "three");
        row.set_cell(3, 4.0);

        let mut decoded = NumericRow::new();
        let result = decoded.decode(Some(&mut row));

        match result {
            Err(XlsxRowsError::TypeMismatch {
                cell,
                expected,
                found,
            }) => {
                assert_eq!(cell, "C1");
                assert_eq!(expected, CellType::Numeric);
                assert_eq!(found, CellType::Text);
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
        // 不一致の列の値は追加されない
        assert_eq!(decoded.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_decode_blank_cell_is_mismatch() {
        let mut row = text_row(&[(0, "a")]);
        row.create_cell(1, CellType::Blank);

        let mut decoded = TextRow::new();
        assert!(matches!(
            decoded.decode(Some(&mut row)),
            Err(XlsxRowsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_absent_and_blank_rows() {
        let mut decoded = TextRow::from_values(vec!["keep".to_string()]);
        assert!(matches!(
            decoded.decode(None),
            Err(XlsxRowsError::AbsentRow)
        ));

        let mut empty = Row::new(0);
        assert!(matches!(
            decoded.decode(Some(&mut empty)),
            Err(XlsxRowsError::BlankRow)
        ));

        let mut blank = Row::new(0);
        blank.create_cell(0, CellType::Blank);
        blank.create_cell(1, CellType::Blank);
        assert!(matches!(
            decoded.decode(Some(&mut blank)),
            Err(XlsxRowsError::BlankRow)
        ));

        // 構造的な失敗では以前の値は消えない
        assert_eq!(decoded.values(), &["keep"]);
    }

    #[test]
    fn test_encode_replaces_existing_cells() {
        let mut row = text_row(&[(0, "x"), (5, "y")]);
        let source = TextRow::from_values(vec!["a".to_string(), "b".to_string()]);
        source.encode(&mut row);

        assert_eq!(row.cell_count(), 2);
        assert_eq!(row.cell(0).and_then(Cell::string_value), Some("a"));
        assert_eq!(row.cell(1).and_then(Cell::string_value), Some("b"));
        assert!(row.cell(5).is_none());
    }

    #[test]
    fn test_encode_empty_row_clears() {
        let mut row = numeric_row(&[(0, 1.0)]);
        NumericRow::new().encode(&mut row);
        assert_eq!(row.cell_count(), 0);
    }

    #[test]
    fn test_array_interop() {
        let mut decoded = NumericRow::new();
        decoded.set_values(&[1.0, 2.0, 3.0]);
        assert_eq!(decoded.to_vec(), vec![1.0, 2.0, 3.0]);

        decoded.set_values(&[9.0]);
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(TextRow::new().to_string(), "Datarow: empty");
        let row = TextRow::from_values(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(row.to_string(), "Datarow: [ 'a', 'b' ]");
        let row = NumericRow::from_values(vec![1.5, f64::NAN]);
        assert_eq!(row.to_string(), "Datarow: [ '1.5', 'NaN' ]");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // 内部にギャップのない行は、decode -> encode で元の値を再現する
            #[test]
            fn test_text_round_trip(values in prop::collection::vec("[a-z0-9 ]{0,12}", 1..40)) {
                let mut row = Row::new(7);
                for (col, value) in values.iter().enumerate() {
                    row.set_cell(col as u16, value.as_str());
                }

                let mut decoded = TextRow::new();
                decoded.decode(Some(&mut row)).unwrap();
                prop_assert_eq!(decoded.values(), values.as_slice());

                let mut target = Row::new(7);
                decoded.encode(&mut target);
                prop_assert_eq!(target, row);
            }

            // デコード後の長さは常に最後のセルの列番号 + 1
            #[test]
            fn test_numeric_dense_length(cols in prop::collection::btree_set(0u16..200, 1..30)) {
                let mut row = Row::new(0);
                for &col in &cols {
                    row.set_cell(col, f64::from(col));
                }
                let last = *cols.iter().next_back().unwrap();

                let mut decoded = NumericRow::new();
                decoded.decode(Some(&mut row)).unwrap();

                prop_assert_eq!(decoded.len(), usize::from(last) + 1);
                for (col, value) in decoded.values().iter().enumerate() {
                    if cols.contains(&(col as u16)) {
                        prop_assert_eq!(*value, col as f64);
                    } else {
                        prop_assert!(value.is_nan());
                    }
                }
                prop_assert_eq!(decoded.stats().unwrap().present_cells, cols.len());
            }
        }
    }
}
