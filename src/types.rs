//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use crate::api::CellType;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Numeric(f64),

    /// 文字列
    Text(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Blank,
}

impl CellValue {
    /// 値の型タグを取得
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Numeric(_) => CellType::Numeric,
            CellValue::Text(_) => CellType::Text,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Error(_) => CellType::Error,
            CellValue::Blank => CellType::Blank,
        }
    }

    /// 値が空かどうかを判定
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// 型タグに対応する初期値を生成
    ///
    /// 数値は`0.0`、文字列は空文字列、論理値は`false`で初期化されます。
    pub fn default_for(cell_type: CellType) -> Self {
        match cell_type {
            CellType::Numeric => CellValue::Numeric(0.0),
            CellType::Text => CellValue::Text(String::new()),
            CellType::Bool => CellValue::Bool(false),
            CellType::Error => CellValue::Error(String::new()),
            CellType::Blank => CellValue::Blank,
        }
    }

    /// 値を文字列として取得（書式適用前）
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Numeric(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Blank => String::new(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Numeric(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Numeric(f64::from(value))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u16,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        format!("{}{}", col_index_to_letter(self.col), self.row + 1)
    }
}

/// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
pub(crate) fn col_index_to_letter(col: u16) -> String {
    let mut col = u32::from(col);
    let mut result = String::new();
    loop {
        let remainder = col % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_cell_type() {
        assert_eq!(CellValue::Numeric(1.0).cell_type(), CellType::Numeric);
        assert_eq!(CellValue::Text("a".into()).cell_type(), CellType::Text);
        assert_eq!(CellValue::Bool(true).cell_type(), CellType::Bool);
        assert_eq!(CellValue::Error("#N/A".into()).cell_type(), CellType::Error);
        assert_eq!(CellValue::Blank.cell_type(), CellType::Blank);
    }

    #[test]
    fn test_cell_value_default_for() {
        assert_eq!(CellValue::default_for(CellType::Numeric), CellValue::Numeric(0.0));
        assert_eq!(
            CellValue::default_for(CellType::Text),
            CellValue::Text(String::new())
        );
        assert!(CellValue::default_for(CellType::Blank).is_blank());
    }

    #[test]
    fn test_cell_value_as_raw_string() {
        assert_eq!(CellValue::Blank.as_raw_string(), "");
        assert_eq!(CellValue::Numeric(42.5).as_raw_string(), "42.5");
        assert_eq!(CellValue::Text("hello".to_string()).as_raw_string(), "hello");
        assert_eq!(CellValue::Bool(true).as_raw_string(), "true");
        assert_eq!(CellValue::Error("#DIV/0!".to_string()).as_raw_string(), "#DIV/0!");
    }

    #[test]
    fn test_cell_value_from() {
        assert_eq!(CellValue::from(3), CellValue::Numeric(3.0));
        assert_eq!(CellValue::from("x"), CellValue::Text("x".to_string()));
        assert_eq!(CellValue::from(false), CellValue::Bool(false));
    }

    #[test]
    fn test_cell_coord_to_a1_notation() {
        assert_eq!(CellCoord::new(0, 0).to_a1_notation(), "A1");
        assert_eq!(CellCoord::new(0, 25).to_a1_notation(), "Z1");
        assert_eq!(CellCoord::new(0, 26).to_a1_notation(), "AA1");
        assert_eq!(CellCoord::new(99, 701).to_a1_notation(), "ZZ100");
        assert_eq!(CellCoord::new(0, 16_383).to_a1_notation(), "XFD1");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_a1_notation_shape(row in 0u32..1_048_576, col in 0u16..16_384) {
                let a1 = CellCoord::new(row, col).to_a1_notation();

                let letters: String = a1.chars().take_while(|c| c.is_ascii_uppercase()).collect();
                let digits: String = a1.chars().skip(letters.len()).collect();

                prop_assert!(!letters.is_empty() && letters.len() <= 3);
                prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
                prop_assert_eq!(digits.parse::<u32>().unwrap(), row + 1);
                prop_assert_eq!(letters, col_index_to_letter(col));
            }
        }
    }
}
