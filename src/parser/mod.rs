//! Parser Module
//!
//! calamineを使用してXLSXファイルを読み込み、スパースなワークブックモデルに変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
