//! Testes de borda da grade e das janelas de varredura.

use chrono::NaiveDate;
use mmzr_report::{CellValue, Grid, MissingDifference, ReportError};

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn number(n: f64) -> CellValue {
    CellValue::Number(n)
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
}

#[test]
fn test_empty_grid_all_sections_not_found() {
    let grid = Grid::from_rows(vec![]);

    assert!(matches!(
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed),
        Err(ReportError::SectionNotFound { .. })
    ));
    assert!(matches!(
        mmzr_report::extract_financial_return(&grid),
        Err(ReportError::SectionNotFound { .. })
    ));
    assert!(matches!(
        mmzr_report::extract_highlight_strategies(&grid, 2),
        Err(ReportError::SectionNotFound { .. })
    ));
    assert!(matches!(
        mmzr_report::extract_promoter_assets(&grid, 2),
        Err(ReportError::SectionNotFound { .. })
    ));
    assert!(matches!(
        mmzr_report::extract_detractor_assets(&grid, 2),
        Err(ReportError::SectionNotFound { .. })
    ));
}

#[test]
fn test_label_case_sensitivity() {
    // Os rótulos da planilha são sensíveis a maiúsculas: "PERFORMANCE" não
    // casa com "Performance".
    let grid = Grid::from_rows(vec![vec![text("PERFORMANCE")]]);
    assert!(matches!(
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed),
        Err(ReportError::SectionNotFound { .. })
    ));
}

#[test]
fn test_label_on_last_row_clips_window() {
    // Rótulo na última linha: a janela de dados fica vazia sem estourar os
    // limites da grade.
    let grid = Grid::from_rows(vec![
        vec![text("dados antigos")],
        vec![text("Performance")],
    ]);

    assert!(matches!(
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed),
        Err(ReportError::SectionEmpty { .. })
    ));
}

#[test]
fn test_label_on_last_column() {
    let grid = Grid::from_rows(vec![
        vec![
            CellValue::Empty,
            CellValue::Empty,
            text("Retorno Financeiro"),
        ],
        vec![CellValue::Empty, CellValue::Empty, number(42.0)],
    ]);

    assert_eq!(mmzr_report::extract_financial_return(&grid).unwrap(), 42.0);
}

#[test]
fn test_single_value_label_at_grid_corner_without_neighbors() {
    // Rótulo na última célula: as sondas abaixo e à direita caem fora da
    // grade e respondem vazio.
    let grid = Grid::from_rows(vec![vec![text("Retorno Financeiro")]]);

    assert!(matches!(
        mmzr_report::extract_financial_return(&grid),
        Err(ReportError::SectionEmpty { .. })
    ));
}

#[test]
fn test_ragged_rows_are_padded() {
    let grid = Grid::from_rows(vec![
        vec![text("Performance")],
        vec![],
        vec![text("Mês atual"), number(1.5), number(0.5)],
        vec![text("No ano")],
    ]);

    // A linha "No ano" é curta demais para ter valores e é descartada; a
    // linha completa sobrevive.
    let records =
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed)
            .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].period, "Maio:");
}

#[test]
fn test_performance_ignores_rows_outside_window() {
    // Dados além da janela de cinco linhas não são lidos.
    let grid = Grid::from_rows(vec![
        vec![text("Performance")],
        vec![],
        vec![text("cabeçalho")],
        vec![text("outra coisa")],
        vec![text("mais uma")],
        vec![text("linha final")],
        vec![text("ainda outra")],
        vec![text("Mês atual"), number(9.0), number(9.0)],
    ]);

    assert!(matches!(
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed),
        Err(ReportError::SectionEmpty { .. })
    ));
}

#[test]
fn test_filtered_list_respects_column_window() {
    // A sexta coluna está fora da janela de cinco colunas dos ativos.
    let mut row = vec![CellValue::Empty; 6];
    row[5] = text("FUNDO LONGE (+9,99%)");

    let grid = Grid::from_rows(vec![
        vec![text("Ativos Promotores")],
        row,
        vec![text("FUNDO PERTO (+1,00%)")],
    ]);

    let assets = mmzr_report::extract_promoter_assets(&grid, 2).unwrap();
    assert_eq!(assets, vec!["FUNDO PERTO (+1,00%)"]);
}

#[test]
fn test_large_grid_scan() {
    // Uma aba grande (10.000 células) continua sendo varrida de ponta a
    // ponta sem problemas.
    let mut rows: Vec<Vec<CellValue>> = (0..500)
        .map(|r| {
            (0..20)
                .map(|c| text(&format!("celula {} {}", r, c)))
                .collect()
        })
        .collect();
    rows[497][0] = text("Performance");
    rows[499][0] = text("Mês atual");
    rows[499][1] = number(2.0);
    rows[499][2] = number(1.0);

    let grid = Grid::from_rows(rows);
    let records =
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed)
            .unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].relative_difference - 1.0).abs() < 1e-9);
}

#[test]
fn test_first_label_occurrence_wins_across_sections() {
    // Duas tabelas "Performance" na mesma aba: somente a primeira é lida,
    // mesmo que a segunda tenha dados.
    let grid = Grid::from_rows(vec![
        vec![text("Performance")],
        vec![],
        vec![text("Mês atual"), number(1.0), number(0.5)],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![text("Performance")],
        vec![],
        vec![text("Mês atual"), number(9.0), number(9.0)],
    ]);

    let records =
        mmzr_report::extract_performance(&grid, reference(), MissingDifference::Computed)
            .unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].portfolio_return - 1.0).abs() < 1e-9);
}
