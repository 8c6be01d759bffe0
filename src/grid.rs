//! Grid Module
//!
//! 行キャッシュの一括変換に使う矩形（行 × 列）配列を提供するモジュール。
//! ギザギザ配列（`Vec<Vec<T>>`）と異なり、すべての行が同じ列数を持ちます。

use std::ops::{Index, IndexMut};

use crate::error::XlsxRowsError;

/// 行優先で格納された矩形配列
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// すべての要素を`fill`で初期化した配列を生成
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    /// 行のリストから配列を生成
    ///
    /// # 戻り値
    ///
    /// * `Ok(Grid)` - すべての行の長さが等しい場合
    /// * `Err(XlsxRowsError::Config)` - 行の長さが揃っていない場合
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, XlsxRowsError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(XlsxRowsError::Config(format!(
                "Row {} has {} columns, expected {}",
                index,
                row.len(),
                cols
            )));
        }
        let row_count = rows.len();
        Ok(Self {
            rows: row_count,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }
}

impl<T> Grid<T> {
    /// 行数
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 列数
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 要素がないかどうか
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// 1行分のスライス
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// 行ごとのスライスを列挙
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.cols, "column {} out of range ({})", col, self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(col < self.cols, "column {} out of range ({})", col, self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(2, 3, 0.0);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[(1, 2)], 0.0);
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid[(2, 0)], 5);
        assert_eq!(grid.row(1), Some(&[3, 4][..]));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_grid_from_ragged_rows_fails() {
        let result = Grid::from_rows(vec![vec![1, 2], vec![3]]);
        match result {
            Err(XlsxRowsError::Config(msg)) => assert!(msg.contains("Row 1 has 1 columns")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_grid_empty() {
        let grid: Grid<String> = Grid::from_rows(Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.iter_rows().count(), 0);
    }

    #[test]
    fn test_grid_index_mut() {
        let mut grid = Grid::new(2, 2, String::new());
        grid[(0, 1)] = "b".to_string();
        let rows: Vec<&[String]> = grid.iter_rows().collect();
        assert_eq!(rows[0], &["".to_string(), "b".to_string()]);
    }

    #[test]
    #[should_panic]
    fn test_grid_index_out_of_range_column() {
        let grid = Grid::new(2, 2, 0);
        let _ = grid[(0, 2)];
    }
}
