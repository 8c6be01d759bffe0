//! パフォーマンスベンチマーク
//!
//! このモジュールは、xlsxrowsクレートの行デコード・書き込みの性能を測定します。
//!
//! 実装するベンチマーク:
//! - ギャップを含む数値シートの一括読み込み（ファイルの読み込みを含む）
//! - 行キャッシュのシートへの書き込みとXLSXバイト列への保存
//! - 行キャッシュの矩形配列への変換
//!
//! フィクスチャは実行時に一時ディレクトリへ生成します。

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;
use xlsxrows::{SessionBuilder, WorkbookSession};

const ROWS: u32 = 5_000;
const COLS: u16 = 12;

/// 3列に1列が欠けた数値シートを生成
fn generate_sparse_sheet(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for row in 0..ROWS {
        for col in (0..COLS).filter(|c| c % 3 != 1) {
            worksheet.write_number(row, col, f64::from(row) * 0.5 + f64::from(col))?;
        }
    }
    workbook.save(path)
}

fn dense_rows() -> Vec<Vec<f64>> {
    (0..ROWS)
        .map(|row| (0..COLS).map(|col| f64::from(row) + f64::from(col)).collect())
        .collect()
}

fn benchmark_read_sparse_sheet(c: &mut Criterion) {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Failed to create temp dir: {}. Skipping benchmark.", e);
            return;
        }
    };
    let path = dir.path().join("sparse.xlsx");
    if let Err(e) = generate_sparse_sheet(&path) {
        eprintln!("Warning: Failed to generate fixture: {}. Skipping benchmark.", e);
        return;
    }

    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Elements(u64::from(ROWS)));
    group.sample_size(10);

    group.bench_function("open_and_read_numeric", |b| {
        b.iter(|| {
            let mut session = SessionBuilder::new()
                .with_base_dir(dir.path())
                .build()
                .expect("valid configuration");
            session.open_workbook("sparse.xlsx").expect("fixture opens");
            let report = session
                .read_sheet_as_numeric(0, false)
                .expect("sheet exists");
            black_box(report.rows_read)
        })
    });

    group.finish();
}

fn benchmark_write_to_buffer(c: &mut Criterion) {
    let rows = dense_rows();

    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Elements(u64::from(ROWS)));
    group.sample_size(10);

    group.bench_function("write_numeric_and_save", |b| {
        b.iter(|| {
            let mut session = WorkbookSession::new();
            session.set_numeric_rows_from_ragged(rows.clone());
            session
                .write_sheet_from_numeric(0, None, false)
                .expect("valid sheet name");
            black_box(session.save_to_buffer().expect("workbook saves").len())
        })
    });

    group.finish();
}

fn benchmark_grid_export(c: &mut Criterion) {
    let mut session = WorkbookSession::new();
    session.set_numeric_rows_from_ragged(dense_rows());

    c.bench_function("numeric_rows_as_grid", |b| {
        b.iter(|| black_box(session.numeric_rows_as_grid().rows()))
    });
}

criterion_group!(
    benches,
    benchmark_read_sparse_sheet,
    benchmark_write_to_buffer,
    benchmark_grid_export
);
criterion_main!(benches);
