//! Workbook Model Module
//!
//! ワークブック・シート・行・セルのスパースなインメモリ表現を提供するモジュール。
//! 行は列番号からセルへのマップ、シートは行番号から行へのマップとして保持し、
//! 内容のない位置（ギャップ）は単に存在しないものとして扱います。

mod row;
mod workbook;

pub use row::{Cell, Row};
pub use workbook::{Sheet, Workbook};
