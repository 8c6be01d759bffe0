//! Row Codec Module
//!
//! スパースなワークシート行と、稠密なインメモリ行オブジェクトとの相互変換を提供するモジュール。
//!
//! - [`TypedRow`]: 単一の型（文字列または数値）のセルだけからなる行。ギャップを補完する
//! - [`MixedRow`]: 列位置が固定された3フィールドの例示行（整数・浮動小数点・文字列）

mod mixed;
mod typed;

pub use mixed::MixedRow;
pub use typed::{CellKind, DecodeStats, NumericRow, TextRow, TypedRow};

use crate::error::XlsxRowsError;
use crate::model::Row;

/// XLSXで扱える最大列数（A〜XFD）
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// 行オブジェクトとワークシート行の相互変換
///
/// `decode`は読み込み、`encode`は書き込みに対応し、先に書き込んだものが
/// そのまま読み出せる（first in, first out）ことを前提とします。
pub trait RowCodec {
    /// ワークシート行から値を読み込む
    ///
    /// # 引数
    ///
    /// * `row` - 読み込む行（シート上に行が存在しない場合は`None`）
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - デコードに成功した場合
    /// * `Err(XlsxRowsError)` - 行が存在しない、空である、または型が一致しない場合
    ///
    /// 失敗した場合でも、失敗するまでに読み込んだ値は保持されます。
    fn decode(&mut self, row: Option<&mut Row>) -> Result<(), XlsxRowsError>;

    /// 行オブジェクトの値をワークシート行に書き込む
    ///
    /// 既存のセルは末尾から順にすべて削除されてから書き込まれます。
    fn encode(&self, row: &mut Row);
}
