//! Builder Module
//!
//! Fluent Builder APIを提供し、`WorkbookSession`インスタンスを段階的に構築する。

use std::path::PathBuf;

use crate::api::DecodePolicy;
use crate::error::XlsxRowsError;
use crate::session::WorkbookSession;

/// デフォルトのワークブックファイル名
pub const DEFAULT_FILE_NAME: &str = "DemoExcelFile.xlsx";

/// デフォルトの最大入力ファイルサイズ（2GB）
pub const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// セッションの設定を保持する構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// 相対パスの基準ディレクトリ（`None`の場合はカレントディレクトリ）
    pub base_dir: Option<PathBuf>,

    /// 既定のワークブックファイル名
    pub file_name: String,

    /// 一括読み込み時のデコード失敗の扱い
    pub decode_policy: DecodePolicy,

    /// 読み込みを許可する最大ファイルサイズ（バイト）
    pub max_input_file_size: u64,

    /// 保存時にすべてのシートの列幅を内容に合わせるか
    pub autofit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            decode_policy: DecodePolicy::BestEffort,
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
            autofit: false,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `WorkbookSession`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrows::{DecodePolicy, SessionBuilder};
///
/// # fn main() -> Result<(), xlsxrows::XlsxRowsError> {
/// let session = SessionBuilder::new()
///     .with_base_dir("data")
///     .with_file_name("report.xlsx")
///     .with_decode_policy(DecodePolicy::Strict)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SessionBuilder {
    /// 内部設定（構築中）
    config: SessionConfig,
}

impl SessionBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 基準ディレクトリ: カレントディレクトリ
    /// - ファイル名: `DemoExcelFile.xlsx`
    /// - デコード方針: BestEffort
    /// - 最大入力サイズ: 2GB
    /// - 列幅の自動調整: しない
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// 相対パスを解決する基準ディレクトリを指定する
    ///
    /// 指定したディレクトリは`build()`時に存在を検証されます。
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    /// 既定のワークブックファイル名を指定する
    ///
    /// # 制約
    ///
    /// * 空でなく、拡張子が`.xlsx`でなければならない
    /// * 制約違反の場合、`build()`時に`XlsxRowsError::Config`を返す
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// 一括読み込みで行のデコードに失敗した場合の扱いを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxrows::{DecodePolicy, SessionBuilder};
    ///
    /// // 最初の失敗で読み込みを中断する
    /// let builder = SessionBuilder::new()
    ///     .with_decode_policy(DecodePolicy::Strict);
    /// ```
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.config.decode_policy = policy;
        self
    }

    /// 読み込みを許可する最大ファイルサイズを指定する
    pub fn with_max_input_file_size(mut self, size: u64) -> Self {
        self.config.max_input_file_size = size;
        self
    }

    /// 保存時にすべてのシートの列幅を内容に合わせるかを指定する
    pub fn with_autofit(mut self, autofit: bool) -> Self {
        self.config.autofit = autofit;
        self
    }

    /// 設定を検証し、`WorkbookSession`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookSession)`: 設定が有効な場合、空のワークブックを持つセッション
    /// * `Err(XlsxRowsError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxRowsError::Config(String)`: 設定の検証に失敗した場合
    ///   * ファイル名が空、または拡張子が`.xlsx`でない
    ///   * 最大入力サイズが0
    ///   * 基準ディレクトリが存在しない、またはディレクトリでない
    pub fn build(self) -> Result<WorkbookSession, XlsxRowsError> {
        // 1. ファイル名の検証
        let file_name = &self.config.file_name;
        if file_name.trim().is_empty() {
            return Err(XlsxRowsError::Config(
                "File name must not be empty".to_string(),
            ));
        }
        if !file_name.to_ascii_lowercase().ends_with(".xlsx") {
            return Err(XlsxRowsError::Config(format!(
                "File name '{}' must have the .xlsx extension",
                file_name
            )));
        }

        // 2. サイズ上限の検証
        if self.config.max_input_file_size == 0 {
            return Err(XlsxRowsError::Config(
                "Maximum input file size must be greater than 0".to_string(),
            ));
        }

        // 3. 基準ディレクトリの検証
        if let Some(dir) = &self.config.base_dir {
            if !dir.is_dir() {
                return Err(XlsxRowsError::Config(format!(
                    "Base directory '{}' does not exist or is not a directory",
                    dir.display()
                )));
            }
        }

        // 4. WorkbookSessionインスタンス生成
        Ok(WorkbookSession::from_config(self.config))
    }
}
