use std::collections::BTreeMap;

use super::row::Row;

/// ワークシート
///
/// 名前と、行番号から行へのスパースマップを保持します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, Row>,
    autofit: bool,
}

impl Sheet {
    /// 空のシートを生成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            autofit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 最後に存在する行の行番号（行がなければ`None`）
    pub fn last_row_num(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    /// 存在する行の数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row_num: u32) -> Option<&Row> {
        self.rows.get(&row_num)
    }

    pub fn row_mut(&mut self, row_num: u32) -> Option<&mut Row> {
        self.rows.get_mut(&row_num)
    }

    /// 指定した行番号に新しい空行を作成する
    ///
    /// 既存の行は置き換えられます。
    pub fn create_row(&mut self, row_num: u32) -> &mut Row {
        let row = self.rows.entry(row_num).or_default();
        *row = Row::new(row_num);
        row
    }

    /// 指定した行を取得し、存在しなければ作成する
    pub fn get_or_create_row(&mut self, row_num: u32) -> &mut Row {
        self.rows.entry(row_num).or_insert_with(|| Row::new(row_num))
    }

    pub fn remove_row(&mut self, row_num: u32) -> Option<Row> {
        self.rows.remove(&row_num)
    }

    /// 存在する行を行番号順に列挙
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.values()
    }

    /// すべての行を末尾から順に削除する
    pub fn clear(&mut self) {
        while let Some(row_num) = self.last_row_num() {
            self.rows.remove(&row_num);
        }
    }

    /// 保存時に列幅を内容に合わせるかどうか
    pub fn autofit(&self) -> bool {
        self.autofit
    }

    pub fn set_autofit(&mut self, autofit: bool) {
        self.autofit = autofit;
    }
}

/// ワークブック
///
/// シートの順序付きリストです。シートの識別子はリスト上の位置（0始まり）です。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// シートを持たない空のワークブックを生成
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// 末尾に新しいシートを追加し、その位置を返す
    pub fn create_sheet(&mut self, name: impl Into<String>) -> usize {
        self.sheets.push(Sheet::new(name));
        self.sheets.len() - 1
    }

    /// 既に構築済みのシートを末尾に追加し、その位置を返す
    pub fn push_sheet(&mut self, sheet: Sheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> + '_ {
        self.sheets.iter()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}
