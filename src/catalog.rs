//! Sheet Catalog Module
//!
//! シートごとの名前とヘッダー行の管理、およびシートの作成・上書き方針を提供するモジュール。
//! カタログのエントリはワークブックのシートと同じ位置（スロット番号）で対応します。

use crate::codec::TextRow;
use crate::error::XlsxRowsError;
use crate::model::Workbook;

/// シート名の最大文字数（Excelの制限）
const MAX_SHEET_NAME_LEN: usize = 31;

/// シート名に使用できない文字
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// カタログ上の1シート分の情報
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetEntry {
    /// シートの表示名
    pub name: String,
    /// ヘッダー行（文字列行）
    pub header: TextRow,
    /// ヘッダー行を使用しているか
    pub has_header: bool,
}

impl SheetEntry {
    fn new(name: impl Into<String>, has_header: bool) -> Self {
        Self {
            name: name.into(),
            header: TextRow::new(),
            has_header,
        }
    }
}

/// シートカタログ
#[derive(Debug, Clone, Default)]
pub struct SheetCatalog {
    entries: Vec<SheetEntry>,
}

impl SheetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, slot: usize) -> Option<&SheetEntry> {
        self.entries.get(slot)
    }

    pub fn entry_mut(&mut self, slot: usize) -> Option<&mut SheetEntry> {
        self.entries.get_mut(slot)
    }

    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    /// すべてのエントリを破棄する
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// シートを作成する、または既存のシートを空にして再利用する
    ///
    /// # 引数
    ///
    /// * `workbook` - 対象のワークブック
    /// * `slot` - シート番号。シート数以上の場合は末尾に新しいシートを追加する（番号は参考値）
    /// * `name` - シート名。`None`または空文字列の場合は`"table {番号}"`
    /// * `has_header` - ヘッダー行を使用するか
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 実際に使用されたシート番号
    /// * `Err(XlsxRowsError::Config)` - シート名がExcelの制限に違反する、または他のシートと重複する場合
    ///
    /// 既存のシートを指定した場合、そのシートのすべての行を末尾から削除し、
    /// ヘッダーを空に戻します。
    pub fn create_or_reset(
        &mut self,
        workbook: &mut Workbook,
        slot: usize,
        name: Option<&str>,
        has_header: bool,
    ) -> Result<usize, XlsxRowsError> {
        self.sync_with(workbook);

        let requested_name = name.filter(|n| !n.is_empty());
        if let Some(name) = requested_name {
            validate_sheet_name(name)?;
        }

        // 1. 新しいシートの追加、または既存シートの消去
        let count = workbook.sheet_count();
        let resolved = slot.min(count);
        let sheet_name = match requested_name {
            Some(name) => name.to_string(),
            None => format!("table {}", resolved),
        };
        check_duplicate_name(workbook, &sheet_name, resolved)?;

        if resolved == count {
            workbook.create_sheet(sheet_name.clone());
            self.entries.push(SheetEntry::new(sheet_name.clone(), has_header));
            log::debug!("created sheet {} '{}'", resolved, sheet_name);
        } else {
            if let Some(sheet) = workbook.sheet_mut(resolved) {
                if sheet.row_count() > 0 {
                    log::debug!("clearing {} rows of sheet {}", sheet.row_count(), resolved);
                    sheet.clear();
                }
            }
            self.entries[resolved] = SheetEntry::new(sheet_name.clone(), has_header);
        }

        // 2. 名前の反映
        if let Some(sheet) = workbook.sheet_mut(resolved) {
            sheet.set_name(sheet_name);
        }

        Ok(resolved)
    }

    /// ワークブックの現在のシート構成からカタログを作り直す
    ///
    /// これまでのヘッダーとヘッダー使用フラグはすべて破棄されます。
    pub fn refresh(&mut self, workbook: &Workbook) {
        self.entries = workbook
            .sheets()
            .map(|sheet| SheetEntry::new(sheet.name(), false))
            .collect();
    }

    /// エントリ数をワークブックのシート数に合わせる（既存のエントリは保持）
    pub(crate) fn sync_with(&mut self, workbook: &Workbook) {
        let count = workbook.sheet_count();
        if self.entries.len() > count {
            self.entries.truncate(count);
        }
        while self.entries.len() < count {
            let name = workbook
                .sheet(self.entries.len())
                .map(|s| s.name().to_string())
                .unwrap_or_default();
            self.entries.push(SheetEntry::new(name, false));
        }
    }
}

/// シート名がExcelの制限を満たすか検証する
fn validate_sheet_name(name: &str) -> Result<(), XlsxRowsError> {
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(XlsxRowsError::Config(format!(
            "Sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(XlsxRowsError::Config(format!(
            "Sheet name '{}' contains invalid character '{}'",
            name, c
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(XlsxRowsError::Config(format!(
            "Sheet name '{}' cannot start or end with an apostrophe",
            name
        )));
    }
    Ok(())
}

/// 他のシートと名前が重複していないか検証する（大文字小文字は区別しない）
fn check_duplicate_name(
    workbook: &Workbook,
    name: &str,
    slot: usize,
) -> Result<(), XlsxRowsError> {
    let lower = name.to_lowercase();
    let duplicate = workbook
        .sheets()
        .enumerate()
        .any(|(i, sheet)| i != slot && sheet.name().to_lowercase() == lower);
    if duplicate {
        return Err(XlsxRowsError::Config(format!(
            "Sheet name '{}' is already used",
            name
        )));
    }
    Ok(())
}
