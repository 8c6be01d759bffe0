//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;

/// セルの型タグ
///
/// ワークシート上の各セルが持つ型を表します。行オブジェクトは宣言された型と
/// セルの型タグを照合し、一致しない場合はデコードに失敗します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CellType {
    /// 数値セル（日付シリアル値を含む）
    Numeric,

    /// 文字列セル
    Text,

    /// 論理値セル
    Bool,

    /// エラー値セル（例: `#DIV/0!`）
    Error,

    /// 空セル（書式のみ存在するセルなど）
    Blank,
}

impl CellType {
    /// 型名を小文字で返す（エラーメッセージ用）
    pub fn name(self) -> &'static str {
        match self {
            CellType::Numeric => "numeric",
            CellType::Text => "text",
            CellType::Bool => "bool",
            CellType::Error => "error",
            CellType::Blank => "blank",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// シート一括読み込み時のデコード方針
///
/// `WorkbookSession::read_sheet_as_*`で個々の行のデコードに失敗した場合の
/// 振る舞いを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DecodePolicy {
    /// 失敗した行もキャッシュに残し、失敗内容をレポートに集めて読み込みを続ける（デフォルト）
    ///
    /// 失敗した行オブジェクトは、失敗するまでにデコードできた値を保持します。
    /// 呼び出し側は`ReadReport::failures`を確認して厳密な検証を行ってください。
    #[default]
    BestEffort,

    /// 最初に失敗した行で読み込みを中断し、エラーを返す
    ///
    /// キャッシュには失敗した行より前にデコードされた行だけが残ります。
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_display() {
        assert_eq!(CellType::Numeric.to_string(), "numeric");
        assert_eq!(CellType::Text.to_string(), "text");
        assert_eq!(CellType::Blank.to_string(), "blank");
    }

    #[test]
    fn test_decode_policy_default() {
        assert_eq!(DecodePolicy::default(), DecodePolicy::BestEffort);
    }
}
