use std::collections::BTreeMap;

use crate::api::CellType;
use crate::types::{CellCoord, CellValue};

/// ワークシート上の1セル
///
/// 型タグと値を`CellValue`として保持します。値を設定すると型タグも変わります。
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    value: CellValue,
}

impl Cell {
    /// 型タグに対応する初期値でセルを生成
    pub fn new(cell_type: CellType) -> Self {
        Self {
            value: CellValue::default_for(cell_type),
        }
    }

    /// 値を指定してセルを生成
    pub fn with_value(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// セルの型タグ
    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// セルの値
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// 値を設定する
    pub fn set_value(&mut self, value: impl Into<CellValue>) {
        self.value = value.into();
    }

    /// 数値セルの値（数値セル以外は`None`）
    pub fn numeric_value(&self) -> Option<f64> {
        match self.value {
            CellValue::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// 文字列セルの値（文字列セル以外は`None`）
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 空セルかどうか
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }
}

/// ワークシート上の1行
///
/// 0始まりの列番号からセルへの順序付きスパースマップです。
/// セルが存在しない列はギャップであり、`cell()`は`None`を返します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    row_num: u32,
    cells: BTreeMap<u16, Cell>,
}

impl Row {
    /// 指定した行番号の空行を生成
    pub fn new(row_num: u32) -> Self {
        Self {
            row_num,
            cells: BTreeMap::new(),
        }
    }

    /// シート上の行番号（0始まり）
    pub fn row_num(&self) -> u32 {
        self.row_num
    }

    /// 最初に存在するセルの列番号
    pub fn first_cell_num(&self) -> Option<u16> {
        self.cells.keys().next().copied()
    }

    /// 最後に存在するセルの列番号
    pub fn last_cell_num(&self) -> Option<u16> {
        self.cells.keys().next_back().copied()
    }

    /// 存在するセルの数
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub fn cell_mut(&mut self, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(&col)
    }

    /// 指定した列に型付きの新しいセルを作成する
    ///
    /// 既存のセルは置き換えられます。
    pub fn create_cell(&mut self, col: u16, cell_type: CellType) -> &mut Cell {
        let cell = self.cells.entry(col).or_insert_with(|| Cell::new(cell_type));
        *cell = Cell::new(cell_type);
        cell
    }

    /// 指定した列に値を書き込む（セルがなければ作成する）
    pub fn set_cell(&mut self, col: u16, value: impl Into<CellValue>) -> &mut Cell {
        let cell = self.cells.entry(col).or_insert_with(|| Cell::new(CellType::Blank));
        cell.set_value(value);
        cell
    }

    pub fn remove_cell(&mut self, col: u16) -> Option<Cell> {
        self.cells.remove(&col)
    }

    /// 存在するセルを列番号順に列挙
    pub fn cells(&self) -> impl Iterator<Item = (u16, &Cell)> + '_ {
        self.cells.iter().map(|(col, cell)| (*col, cell))
    }

    /// すべてのセルが空セルかどうか
    ///
    /// セルが1つも存在しない行も空とみなします。
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }

    /// すべてのセルを末尾から順に削除する
    pub fn clear(&mut self) {
        while let Some(col) = self.last_cell_num() {
            self.cells.remove(&col);
        }
    }

    pub(crate) fn coord(&self, col: u16) -> CellCoord {
        CellCoord::new(self.row_num, col)
    }
}
