//! Session Module
//!
//! ワークブック、シートカタログ、3種類の行キャッシュをまとめて管理するファサード。
//! シート単位の一括読み込み・書き込み、配列との相互変換、テキスト表示を提供します。

use std::fmt::{self, Write as _};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::api::DecodePolicy;
use crate::builder::{SessionBuilder, SessionConfig};
use crate::catalog::SheetCatalog;
use crate::codec::{CellKind, MixedRow, NumericRow, RowCodec, TextRow, TypedRow};
use crate::error::XlsxRowsError;
use crate::grid::Grid;
use crate::model::Workbook;
use crate::output::XlsxWriter;
use crate::parser::WorkbookParser;

/// 1行分のデコード失敗
#[derive(Debug)]
pub struct RowFailure {
    /// シート上の行番号（0始まり）
    pub row: u32,
    /// 失敗の原因
    pub error: XlsxRowsError,
}

/// シートの一括読み込みの結果
///
/// `DecodePolicy::BestEffort`では、失敗した行も行キャッシュに残り（デコードできた
/// ところまでの値を保持）、その行番号と原因が`failures`に記録されます。
#[derive(Debug, Default)]
pub struct ReadReport {
    /// 行キャッシュに追加された行数（ヘッダー行を除く）
    pub rows_read: usize,
    /// デコードに失敗した行（ヘッダー行を含む）
    pub failures: Vec<RowFailure>,
}

impl ReadReport {
    /// すべての行がデコードできたか
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// ワークブックセッション
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrows::WorkbookSession;
///
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let mut session = WorkbookSession::new();
/// session.open_workbook("input.xlsx")?;
///
/// let report = session.read_sheet_as_numeric(0, true)?;
/// println!("{} rows, {} failures", report.rows_read, report.failures.len());
///
/// for row in session.numeric_rows_mut() {
///     for value in row.values_mut() {
///         *value *= 2.0;
///     }
/// }
///
/// session.write_sheet_from_numeric(1, Some("doubled"), true)?;
/// session.save_workbook("output.xlsx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WorkbookSession {
    config: SessionConfig,
    workbook: Workbook,
    catalog: SheetCatalog,
    text_rows: Vec<TextRow>,
    numeric_rows: Vec<NumericRow>,
    mixed_rows: Vec<MixedRow>,
    /// 直近に開いた、または保存したファイル
    file_path: PathBuf,
}

impl Default for WorkbookSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookSession {
    /// デフォルト設定で空のワークブックを持つセッションを生成する
    ///
    /// 設定を変更する場合は[`SessionBuilder`]を使用してください。
    pub fn new() -> Self {
        Self::from_config(SessionConfig::default())
    }

    /// 検証済みの設定からセッションを生成する
    pub(crate) fn from_config(config: SessionConfig) -> Self {
        let file_path = resolve(&config, Path::new(&config.file_name));
        Self {
            config,
            workbook: Workbook::new(),
            catalog: SheetCatalog::new(),
            text_rows: Vec::new(),
            numeric_rows: Vec::new(),
            mixed_rows: Vec::new(),
            file_path,
        }
    }

    /// ビルダーを生成する（`SessionBuilder::new()`と同じ）
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.config.decode_policy
    }

    // ------------------------------------------------------------------
    // ワークブックの入出力
    // ------------------------------------------------------------------

    /// ワークブックを空の状態に置き換える
    ///
    /// シートカタログと3種類の行キャッシュも破棄されます。
    pub fn create_workbook(&mut self) {
        self.workbook = Workbook::new();
        self.catalog.clear();
        self.text_rows.clear();
        self.numeric_rows.clear();
        self.mixed_rows.clear();
    }

    /// ファイル名を基準ディレクトリに対して解決する
    ///
    /// 絶対パスはそのまま返します。基準ディレクトリが設定されていない場合は
    /// カレントディレクトリを基準にします。
    pub fn resolve_path(&self, name: impl AsRef<Path>) -> PathBuf {
        resolve(&self.config, name.as_ref())
    }

    /// 直近に開いた、または保存したファイルのパス
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// XLSXファイルを読み込み、シートカタログを作り直す
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 読み込んだシート数
    /// * `Err(XlsxRowsError)` - ファイルが開けない、サイズ上限を超える、または解析に失敗した場合
    ///
    /// 失敗した場合、現在のワークブックは変更されません。
    /// 行キャッシュは保持されるため、別のファイルへそのまま書き込むことができます。
    pub fn open_workbook(&mut self, name: impl AsRef<Path>) -> Result<usize, XlsxRowsError> {
        let path = self.resolve_path(name);
        let file = File::open(&path)?;
        let workbook = WorkbookParser::open(file, self.config.max_input_file_size)?.read_workbook()?;

        log::info!(
            "opened '{}' ({} sheets)",
            path.display(),
            workbook.sheet_count()
        );
        self.workbook = workbook;
        self.catalog.refresh(&self.workbook);
        self.file_path = path;
        Ok(self.workbook.sheet_count())
    }

    /// 直近のファイルを読み込み直す
    pub fn reopen_workbook(&mut self) -> Result<usize, XlsxRowsError> {
        let path = self.file_path.clone();
        self.open_workbook(path)
    }

    /// ワークブックをXLSXファイルに保存する
    ///
    /// 既存のファイルは上書きされます。
    pub fn save_workbook(&mut self, name: impl AsRef<Path>) -> Result<(), XlsxRowsError> {
        let path = self.resolve_path(name);
        XlsxWriter::new(self.config.autofit).save(&self.workbook, &path)?;
        log::info!(
            "saved '{}' ({} sheets)",
            path.display(),
            self.workbook.sheet_count()
        );
        self.file_path = path;
        Ok(())
    }

    /// 直近のファイルに上書き保存する
    pub fn save(&mut self) -> Result<(), XlsxRowsError> {
        let path = self.file_path.clone();
        self.save_workbook(path)
    }

    /// ワークブックをメモリ上のXLSXバイト列に書き出す
    pub fn save_to_buffer(&self) -> Result<Vec<u8>, XlsxRowsError> {
        XlsxWriter::new(self.config.autofit).save_to_buffer(&self.workbook)
    }

    // ------------------------------------------------------------------
    // シート管理
    // ------------------------------------------------------------------

    /// シートを作成する、または既存のシートを空にして再利用する
    ///
    /// 詳細は[`SheetCatalog::create_or_reset`]を参照してください。
    pub fn create_sheet(
        &mut self,
        slot: usize,
        name: Option<&str>,
        has_header: bool,
    ) -> Result<usize, XlsxRowsError> {
        self.catalog
            .create_or_reset(&mut self.workbook, slot, name, has_header)
    }

    /// ワークブックのシート構成からカタログを作り直す
    ///
    /// ヘッダーとヘッダー使用フラグはすべて破棄されます。
    pub fn refresh_sheets(&mut self) -> usize {
        self.catalog.refresh(&self.workbook);
        self.catalog.len()
    }

    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_count()
    }

    pub fn sheet_name(&self, slot: usize) -> Option<&str> {
        self.workbook.sheet(slot).map(|s| s.name())
    }

    /// カタログに記録されたヘッダー行
    pub fn header(&self, slot: usize) -> Option<&TextRow> {
        self.catalog.entry(slot).map(|e| &e.header)
    }

    pub fn has_header(&self, slot: usize) -> bool {
        self.catalog.entry(slot).is_some_and(|e| e.has_header)
    }

    pub fn catalog(&self) -> &SheetCatalog {
        &self.catalog
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// ワークブックへの可変参照
    ///
    /// シートを直接追加・削除した場合は[`refresh_sheets`](Self::refresh_sheets)で
    /// カタログを同期してください。
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    /// 既存シートのヘッダーを置き換え、行0をその場で書き換える
    ///
    /// ファイルへの保存は行いません。
    pub fn change_header(&mut self, slot: usize, heads: &[&str]) -> Result<(), XlsxRowsError> {
        self.catalog.sync_with(&self.workbook);
        let count = self.workbook.sheet_count();
        let out_of_range = XlsxRowsError::SheetOutOfRange { index: slot, count };
        let sheet = self.workbook.sheet_mut(slot).ok_or(out_of_range)?;
        let entry = self
            .catalog
            .entry_mut(slot)
            .ok_or(XlsxRowsError::SheetOutOfRange { index: slot, count })?;

        entry.has_header = true;
        entry.header = heads.iter().map(|h| h.to_string()).collect::<Vec<_>>().into();
        entry.header.encode(sheet.get_or_create_row(0));
        log::debug!("sheet {}: header changed to {}", slot, entry.header);
        Ok(())
    }

    // ------------------------------------------------------------------
    // シートの一括読み込み
    // ------------------------------------------------------------------

    /// シートのすべての行を文字列行として読み込む
    ///
    /// # 引数
    ///
    /// * `slot` - シート番号
    /// * `use_header` - 行0をヘッダーとしてカタログに読み込み、行1から読み込むか
    ///
    /// # 戻り値
    ///
    /// * `Ok(ReadReport)` - 読み込んだ行数とデコードに失敗した行
    /// * `Err(XlsxRowsError::SheetOutOfRange)` - シート番号が範囲外の場合
    /// * `Err(XlsxRowsError::RowDecode)` - `DecodePolicy::Strict`で行のデコードに失敗した場合
    ///
    /// 行キャッシュは読み込みの前に空にされます。
    pub fn read_sheet_as_text(
        &mut self,
        slot: usize,
        use_header: bool,
    ) -> Result<ReadReport, XlsxRowsError> {
        read_rows(
            &mut self.workbook,
            &mut self.catalog,
            self.config.decode_policy,
            slot,
            use_header,
            &mut self.text_rows,
        )
    }

    /// シートのすべての行を数値行として読み込む
    pub fn read_sheet_as_numeric(
        &mut self,
        slot: usize,
        use_header: bool,
    ) -> Result<ReadReport, XlsxRowsError> {
        read_rows(
            &mut self.workbook,
            &mut self.catalog,
            self.config.decode_policy,
            slot,
            use_header,
            &mut self.numeric_rows,
        )
    }

    /// シートのすべての行を混合型の行として読み込む
    pub fn read_sheet_as_mixed(
        &mut self,
        slot: usize,
        use_header: bool,
    ) -> Result<ReadReport, XlsxRowsError> {
        read_rows(
            &mut self.workbook,
            &mut self.catalog,
            self.config.decode_policy,
            slot,
            use_header,
            &mut self.mixed_rows,
        )
    }

    // ------------------------------------------------------------------
    // シートへの一括書き込み
    // ------------------------------------------------------------------

    /// 文字列行のキャッシュをシートに書き込む
    ///
    /// # 引数
    ///
    /// * `slot` - シート番号（シート数以上の場合は末尾に追加）
    /// * `name` - シート名（`None`の場合は`"table {番号}"`）
    /// * `use_header` - カタログのヘッダーを行0に書き込み、行1から書き込むか
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 実際に使用されたシート番号
    /// * `Err(XlsxRowsError::Config)` - シート名が不正な場合
    ///
    /// 既存のシートは書き込み前に空にされますが、そのシートのヘッダーは引き継がれます。
    pub fn write_sheet_from_text(
        &mut self,
        slot: usize,
        name: Option<&str>,
        use_header: bool,
    ) -> Result<usize, XlsxRowsError> {
        write_rows(
            &mut self.workbook,
            &mut self.catalog,
            slot,
            name,
            use_header,
            &self.text_rows,
        )
    }

    /// 数値行のキャッシュをシートに書き込む
    pub fn write_sheet_from_numeric(
        &mut self,
        slot: usize,
        name: Option<&str>,
        use_header: bool,
    ) -> Result<usize, XlsxRowsError> {
        write_rows(
            &mut self.workbook,
            &mut self.catalog,
            slot,
            name,
            use_header,
            &self.numeric_rows,
        )
    }

    /// 混合型の行のキャッシュをシートに書き込む
    pub fn write_sheet_from_mixed(
        &mut self,
        slot: usize,
        name: Option<&str>,
        use_header: bool,
    ) -> Result<usize, XlsxRowsError> {
        write_rows(
            &mut self.workbook,
            &mut self.catalog,
            slot,
            name,
            use_header,
            &self.mixed_rows,
        )
    }

    // ------------------------------------------------------------------
    // 行キャッシュ
    // ------------------------------------------------------------------

    pub fn text_rows(&self) -> &[TextRow] {
        &self.text_rows
    }

    pub fn text_rows_mut(&mut self) -> &mut Vec<TextRow> {
        &mut self.text_rows
    }

    pub fn numeric_rows(&self) -> &[NumericRow] {
        &self.numeric_rows
    }

    pub fn numeric_rows_mut(&mut self) -> &mut Vec<NumericRow> {
        &mut self.numeric_rows
    }

    pub fn mixed_rows(&self) -> &[MixedRow] {
        &self.mixed_rows
    }

    pub fn mixed_rows_mut(&mut self) -> &mut Vec<MixedRow> {
        &mut self.mixed_rows
    }

    // ------------------------------------------------------------------
    // 配列との相互変換
    // ------------------------------------------------------------------

    /// 文字列行を矩形配列として取り出す
    ///
    /// 列数は先頭行の長さに揃えられ、短い行は空文字列で埋められ、長い行は切り詰められます。
    pub fn text_rows_as_grid(&self) -> Grid<String> {
        rows_as_grid(&self.text_rows)
    }

    /// 文字列行を行ごとの長さを保った配列として取り出す
    pub fn text_rows_as_ragged(&self) -> Vec<Vec<String>> {
        rows_as_ragged(&self.text_rows)
    }

    /// 矩形配列で文字列行のキャッシュを置き換える
    pub fn set_text_rows_from_grid(&mut self, grid: &Grid<String>) {
        self.text_rows = rows_from_grid(grid);
    }

    /// 行ごとの配列で文字列行のキャッシュを置き換える
    pub fn set_text_rows_from_ragged(&mut self, rows: Vec<Vec<String>>) {
        self.text_rows = rows.into_iter().map(TypedRow::from_values).collect();
    }

    /// 数値行を矩形配列として取り出す（短い行は`0.0`で埋める）
    pub fn numeric_rows_as_grid(&self) -> Grid<f64> {
        rows_as_grid(&self.numeric_rows)
    }

    pub fn numeric_rows_as_ragged(&self) -> Vec<Vec<f64>> {
        rows_as_ragged(&self.numeric_rows)
    }

    pub fn set_numeric_rows_from_grid(&mut self, grid: &Grid<f64>) {
        self.numeric_rows = rows_from_grid(grid);
    }

    pub fn set_numeric_rows_from_ragged(&mut self, rows: Vec<Vec<f64>>) {
        self.numeric_rows = rows.into_iter().map(TypedRow::from_values).collect();
    }

    // ------------------------------------------------------------------
    // テキスト表示
    // ------------------------------------------------------------------

    /// 文字列行のキャッシュを1行ずつテキストにする
    ///
    /// `use_header`の場合は先頭にシートのヘッダーを出力します。
    /// キャッシュが空の場合は`empty list...`を出力します。
    pub fn render_text_rows(&self, slot: usize, use_header: bool) -> String {
        render_rows(self.render_header(slot, use_header), &self.text_rows)
    }

    pub fn render_numeric_rows(&self, slot: usize, use_header: bool) -> String {
        render_rows(self.render_header(slot, use_header), &self.numeric_rows)
    }

    pub fn render_mixed_rows(&self, slot: usize, use_header: bool) -> String {
        render_rows(self.render_header(slot, use_header), &self.mixed_rows)
    }

    fn render_header(&self, slot: usize, use_header: bool) -> Option<&TextRow> {
        if use_header {
            self.header(slot)
        } else {
            None
        }
    }
}

fn resolve(config: &SessionConfig, name: &Path) -> PathBuf {
    if name.is_absolute() {
        return name.to_path_buf();
    }
    match &config.base_dir {
        Some(dir) => dir.join(name),
        None => std::env::current_dir()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| name.to_path_buf()),
    }
}

/// シートの行を順にデコードし、行キャッシュを作り直す
fn read_rows<C: RowCodec + Default>(
    workbook: &mut Workbook,
    catalog: &mut SheetCatalog,
    policy: DecodePolicy,
    slot: usize,
    use_header: bool,
    cache: &mut Vec<C>,
) -> Result<ReadReport, XlsxRowsError> {
    catalog.sync_with(workbook);
    let count = workbook.sheet_count();
    let sheet = workbook
        .sheet_mut(slot)
        .ok_or(XlsxRowsError::SheetOutOfRange { index: slot, count })?;

    cache.clear();
    let mut report = ReadReport::default();

    // 1. ヘッダー行
    let mut first_row = 0;
    if use_header {
        if let Some(entry) = catalog.entry_mut(slot) {
            entry.has_header = true;
            if let Err(error) = entry.header.decode(sheet.row_mut(0)) {
                handle_failure(policy, slot, 0, error, &mut report)?;
            }
        }
        first_row = 1;
    }

    // 2. データ行（行番号が飛んでいる位置も1行として扱う）
    let Some(last_row) = sheet.last_row_num() else {
        return Ok(report);
    };
    if last_row < first_row {
        return Ok(report);
    }

    for row_num in first_row..=last_row {
        let mut item = C::default();
        let result = item.decode(sheet.row_mut(row_num));
        if let Err(error) = result {
            handle_failure(policy, slot, row_num, error, &mut report)?;
        }
        cache.push(item);
        report.rows_read += 1;
    }

    log::debug!(
        "sheet {}: {} rows read, {} failures",
        slot,
        report.rows_read,
        report.failures.len()
    );
    Ok(report)
}

fn handle_failure(
    policy: DecodePolicy,
    slot: usize,
    row: u32,
    error: XlsxRowsError,
    report: &mut ReadReport,
) -> Result<(), XlsxRowsError> {
    match policy {
        DecodePolicy::Strict => Err(XlsxRowsError::RowDecode {
            sheet: slot,
            row,
            source: Box::new(error),
        }),
        DecodePolicy::BestEffort => {
            log::warn!("sheet {}: row {}: {}", slot, row, error);
            report.failures.push(RowFailure { row, error });
            Ok(())
        }
    }
}

/// 行キャッシュをシートに書き込む
fn write_rows<C: RowCodec>(
    workbook: &mut Workbook,
    catalog: &mut SheetCatalog,
    slot: usize,
    name: Option<&str>,
    use_header: bool,
    cache: &[C],
) -> Result<usize, XlsxRowsError> {
    // 上書きされるシートのヘッダーを引き継ぐ
    let previous_header = if slot < workbook.sheet_count() {
        catalog.entry(slot).map(|e| e.header.clone())
    } else {
        None
    };

    let slot = catalog.create_or_reset(workbook, slot, name, use_header)?;
    let count = workbook.sheet_count();
    let sheet = workbook
        .sheet_mut(slot)
        .ok_or(XlsxRowsError::SheetOutOfRange { index: slot, count })?;

    let mut offset = 0;
    if use_header {
        if let Some(entry) = catalog.entry_mut(slot) {
            entry.header = previous_header.unwrap_or_default();
            entry.header.encode(sheet.create_row(0));
        }
        offset = 1;
    }

    for (row_num, item) in (offset..).zip(cache) {
        item.encode(sheet.create_row(row_num));
    }

    log::debug!("sheet {}: wrote {} rows", slot, cache.len());
    Ok(slot)
}

fn rows_as_grid<T: CellKind>(rows: &[TypedRow<T>]) -> Grid<T> {
    let cols = rows.first().map_or(0, TypedRow::len);
    let mut grid = Grid::new(rows.len(), cols, T::padding());
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.values().iter().take(cols).enumerate() {
            grid[(r, c)] = value.clone();
        }
    }
    grid
}

fn rows_as_ragged<T: CellKind>(rows: &[TypedRow<T>]) -> Vec<Vec<T>> {
    rows.iter().map(TypedRow::to_vec).collect()
}

fn rows_from_grid<T: CellKind>(grid: &Grid<T>) -> Vec<TypedRow<T>> {
    grid.iter_rows()
        .map(|row| TypedRow::from_values(row.to_vec()))
        .collect()
}

fn render_rows<C: fmt::Display>(header: Option<&TextRow>, rows: &[C]) -> String {
    let mut text = String::new();
    if let Some(header) = header {
        let _ = writeln!(text, "{}", header);
    }
    if rows.is_empty() {
        text.push_str("empty list...\n");
    }
    for row in rows {
        let _ = writeln!(text, "{}", row);
    }
    text
}
