//! Benchmarks de varredura da grade.
//!
//! Mede a localização de rótulos e a extração completa de uma carteira
//! sobre uma aba grande (na ordem das maiores planilhas reais, ~10.000
//! células).

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mmzr_report::{CellValue, Grid, MissingDifference};

/// Grade de 500 x 20 células com as seções do relatório perto do fim.
fn build_large_grid() -> Grid {
    let mut rows: Vec<Vec<CellValue>> = (0..500)
        .map(|r| {
            (0..20)
                .map(|c| CellValue::Text(format!("celula {} {}", r, c)))
                .collect()
        })
        .collect();

    rows[480][0] = CellValue::Text("Performance".to_string());
    rows[482][0] = CellValue::Text("Mês atual".to_string());
    rows[482][1] = CellValue::Number(2.38);
    rows[482][2] = CellValue::Number(1.45);
    rows[483][0] = CellValue::Text("No ano".to_string());
    rows[483][1] = CellValue::Number(8.76);
    rows[483][2] = CellValue::Number(5.32);

    rows[485][0] = CellValue::Text("Retorno Financeiro".to_string());
    rows[486][0] = CellValue::Number(15234.56);

    rows[488][0] = CellValue::Text("Ativos Promotores".to_string());
    rows[489][0] = CellValue::Text("FUNDO A (+7,83%)".to_string());

    Grid::from_rows(rows)
}

fn benchmark_locate_label(c: &mut Criterion) {
    let grid = build_large_grid();

    c.bench_function("locate_label_late_match", |b| {
        b.iter(|| black_box(&grid).locate_label(black_box("Ativos Promotores")))
    });

    c.bench_function("locate_label_absent", |b| {
        b.iter(|| black_box(&grid).locate_label(black_box("Ativos Detratores")))
    });
}

fn benchmark_extract_performance(c: &mut Criterion) {
    let grid = build_large_grid();
    let reference = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();

    c.bench_function("extract_performance_large_grid", |b| {
        b.iter(|| {
            mmzr_report::extract_performance(
                black_box(&grid),
                reference,
                MissingDifference::Computed,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, benchmark_locate_label, benchmark_extract_performance);
criterion_main!(benches);
