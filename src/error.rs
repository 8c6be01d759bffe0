//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

use crate::api::CellType;

/// xlsxrowsクレート全体で使用するエラー型
///
/// ワークブックの読み書き、行オブジェクトのデコード、シート管理の各処理で
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io` / `Parse` / `Write`: ファイル入出力と外部ライブラリ由来のエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `InputTooLarge`: 入力ファイルのサイズ制限に違反したエラー
/// - `SheetOutOfRange`: 存在しないシート番号が指定されたエラー
/// - `AbsentRow` / `BlankRow`: デコード対象の行が存在しない、またはすべて空セル
/// - `TypeMismatch` / `MissingCell`: 行の内容が宣言された型と一致しない
/// - `RowDecode`: 一括読み込み（Strict）で失敗した行番号付きのエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxrows::{WorkbookSession, XlsxRowsError};
///
/// fn first_sheet_as_numbers(path: &str) -> Result<usize, XlsxRowsError> {
///     let mut session = WorkbookSession::new();
///     session.open_workbook(path)?;
///     let report = session.read_sheet_as_numeric(0, false)?;
///     Ok(report.rows_read)
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxRowsError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// Excelファイルの書き込み中に発生したエラー（rust_xlsxwriter由来）
    #[error("Failed to write Excel file: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// 設定の検証に失敗したエラー
    ///
    /// `SessionBuilder::build()`時の検証や、不正なシート名の指定などで発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力ファイルが設定された上限サイズを超えている
    #[error("Input file size exceeds maximum: {size} bytes (max: {max} bytes)")]
    InputTooLarge {
        /// 読み込んだバイト数
        size: u64,
        /// 許容される最大バイト数
        max: u64,
    },

    /// 存在しないシート番号が指定されたエラー
    #[error("Sheet index {index} is out of range (total: {count})")]
    SheetOutOfRange {
        /// 指定されたシート番号
        index: usize,
        /// ワークブック内のシート数
        count: usize,
    },

    /// デコード対象の行が存在しない
    #[error("Row does not exist")]
    AbsentRow,

    /// 行内のすべてのセルが空（セルが1つもない場合を含む）
    #[error("Row contains only blank cells")]
    BlankRow,

    /// セルの型が行の宣言型と一致しない
    #[error("Cell {cell} is {found}, expected {expected}")]
    TypeMismatch {
        /// セル座標（A1記法）
        cell: String,
        /// 行オブジェクトが要求する型
        expected: CellType,
        /// 実際のセルの型
        found: CellType,
    },

    /// 固定スキーマの行で途中のセルが欠けている
    #[error("Cell {cell} is missing")]
    MissingCell {
        /// 欠けているセル座標（A1記法）
        cell: String,
    },

    /// 一括読み込み中に特定の行のデコードに失敗した
    #[error("Failed to decode row {row} of sheet {sheet}: {source}")]
    RowDecode {
        /// シート番号
        sheet: usize,
        /// シート上の行番号（0始まり）
        row: u32,
        /// 行デコードのエラー
        #[source]
        source: Box<XlsxRowsError>,
    },
}

impl XlsxRowsError {
    /// 行単位のデコードエラーかどうかを判定
    ///
    /// ファイル入出力や設定のエラーと区別するために使用します。
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            XlsxRowsError::AbsentRow
                | XlsxRowsError::BlankRow
                | XlsxRowsError::TypeMismatch { .. }
                | XlsxRowsError::MissingCell { .. }
                | XlsxRowsError::RowDecode { .. }
        )
    }
}
