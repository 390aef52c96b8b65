//! Módulo Extractor
//!
//! Localizadores heurísticos de seções da planilha de rentabilidade. Cada
//! seção é identificada por um rótulo em português ("Performance", "Ativos
//! Promotores", ...) localizado por substring em qualquer célula da grade, e
//! os dados são lidos de uma vizinhança de tamanho fixo relativa ao rótulo.
//!
//! Os deslocamentos são a convenção observada nas planilhas dos bankers e
//! ficam em constantes nomeadas, testáveis e ajustáveis sem tocar na lógica
//! de varredura. Seções obrigatórias ausentes falham com erro nomeado; o
//! relatório nunca é preenchido com dados substitutos.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::MissingDifference;
use crate::error::ReportError;
use crate::formatter::month_name_pt;
use crate::grid::Grid;
use crate::types::PerformanceRecord;

/// Rótulo da tabela de performance.
pub const PERFORMANCE_LABEL: &str = "Performance";

/// Rótulo do retorno financeiro.
pub const FINANCIAL_RETURN_LABEL: &str = "Retorno Financeiro";

/// Rótulo das estratégias de destaque.
pub const STRATEGY_LABEL: &str = "Estratégias de Destaque";

/// Rótulo dos ativos promotores.
pub const PROMOTER_LABEL: &str = "Ativos Promotores";

/// Rótulo dos ativos detratores.
pub const DETRACTOR_LABEL: &str = "Ativos Detratores";

/// Linhas entre o rótulo "Performance" e a primeira linha de dados.
pub(crate) const PERFORMANCE_DATA_OFFSET: usize = 2;

/// Tamanho da janela de varredura da tabela de performance, em linhas.
pub(crate) const PERFORMANCE_WINDOW: usize = 5;

/// Linhas entre o rótulo de uma lista e a primeira linha candidata.
pub(crate) const LIST_DATA_OFFSET: usize = 1;

/// Janela de varredura das listas de ativos, em linhas.
pub(crate) const ASSET_ROW_WINDOW: usize = 10;

/// Colunas inspecionadas por linha nas listas de ativos.
pub(crate) const ASSET_COL_WINDOW: usize = 5;

/// Janela de varredura das estratégias de destaque, em linhas.
pub(crate) const STRATEGY_ROW_WINDOW: usize = 5;

/// Colunas inspecionadas por linha nas estratégias de destaque.
pub(crate) const STRATEGY_COL_WINDOW: usize = 3;

/// Substring que exclui linhas de cabeçalho na busca do retorno financeiro.
const FINANCIAL_RETURN_EXCLUDE: &str = "Período";

/// Palavras de cabeçalho de seção que nunca são dados de lista.
const SECTION_KEYWORDS: [&str; 5] = ["ativo", "promotor", "detrator", "estratégia", "destaque"];

/// Percentual entre parênteses em uma linha de ativo, ex.: "(+7,83%)".
static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([-+]?\d+[.,]?\d*)%\)").expect("falha ao compilar PERCENTAGE_RE")
});

/// Filtro de sinal aplicado ao percentual de uma linha de ativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignFilter {
    /// Mantém apenas percentuais estritamente positivos.
    Positive,
    /// Mantém apenas percentuais estritamente negativos.
    Negative,
}

/// Parâmetros de varredura de uma seção em lista.
///
/// As três listas do relatório (estratégias, promotores, detratores) são
/// especializações de uma única primitiva de varredura, variando rótulo,
/// janela e filtro de sinal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListScan {
    /// Rótulo da seção.
    pub label: &'static str,

    /// Palavra-chave da própria seção, removida da stoplist para não
    /// rejeitar dados legítimos que a mencionem.
    pub own_keyword: &'static str,

    /// Linhas varridas abaixo do rótulo.
    pub row_window: usize,

    /// Colunas inspecionadas por linha.
    pub col_window: usize,

    /// Filtro de sinal do percentual, quando a seção exige um.
    pub sign: Option<SignFilter>,
}

/// Extrai as linhas da tabela de performance.
///
/// Localiza o rótulo "Performance" e varre a janela de
/// [`PERFORMANCE_WINDOW`] linhas a partir de [`PERFORMANCE_DATA_OFFSET`]
/// linhas abaixo do rótulo. Linhas cujo primeiro texto contém "mês"/"mes"
/// viram o mês da data de referência ("Maio:"); linhas contendo "ano" viram
/// "No ano:"; as demais são ignoradas. As colunas 1 e 2 precisam ser
/// numéricas, senão a linha é descartada em silêncio; a coluna 3 é opcional
/// e, ausente, segue o knob `missing_difference`.
///
/// A lista devolvida segue a ordem de descoberta e pode ter mais de duas
/// linhas; o corte para os dois períodos canônicos é responsabilidade da
/// camada de renderização.
///
/// # Erros
///
/// * [`ReportError::SectionNotFound`] se o rótulo não ocorre na grade
/// * [`ReportError::SectionEmpty`] se a janela não produziu nenhum registro
pub fn extract_performance(
    grid: &Grid,
    reference: NaiveDate,
    missing_difference: MissingDifference,
) -> Result<Vec<PerformanceRecord>, ReportError> {
    let label_match = grid
        .locate_label(PERFORMANCE_LABEL)
        .ok_or_else(|| ReportError::section_not_found(PERFORMANCE_LABEL))?;

    let start = label_match.row + PERFORMANCE_DATA_OFFSET;
    let end = (start + PERFORMANCE_WINDOW).min(grid.rows());

    let mut records = Vec::new();
    for row in start..end {
        let Some(raw_period) = grid.cell_text(row, 0) else {
            continue;
        };

        let lowered = raw_period.to_lowercase();
        let period = if lowered.contains("mês") || lowered.contains("mes") {
            format!("{}:", month_name_pt(reference.month()))
        } else if lowered.contains("ano") {
            "No ano:".to_string()
        } else {
            continue;
        };

        let (Some(portfolio_return), Some(benchmark_return)) =
            (grid.cell_number(row, 1), grid.cell_number(row, 2))
        else {
            tracing::warn!(row, periodo = %raw_period, "linha de performance sem valores numéricos, descartada");
            continue;
        };

        let relative_difference = grid.cell_number(row, 3).unwrap_or(match missing_difference {
            MissingDifference::Computed => portfolio_return - benchmark_return,
            MissingDifference::Zero => 0.0,
        });

        records.push(PerformanceRecord {
            period,
            portfolio_return,
            benchmark_return,
            relative_difference,
        });
    }

    if records.is_empty() {
        return Err(ReportError::section_empty(PERFORMANCE_LABEL));
    }

    tracing::debug!(registros = records.len(), "performance extraída");
    Ok(records)
}

/// Extrai o retorno financeiro da carteira, em reais.
pub fn extract_financial_return(grid: &Grid) -> Result<f64, ReportError> {
    extract_single_value(grid, FINANCIAL_RETURN_LABEL, Some(FINANCIAL_RETURN_EXCLUDE))
}

/// Extrai um valor numérico isolado vizinho a um rótulo.
///
/// Varre a grade por linhas e, para cada célula cujo texto contém `label`
/// mas não `exclude`, sonda a célula imediatamente abaixo e depois a da
/// direita em busca de um número. O primeiro número encontrado vence.
///
/// # Erros
///
/// * [`ReportError::SectionNotFound`] se nenhuma célula qualifica como
///   rótulo
/// * [`ReportError::SectionEmpty`] se o rótulo ocorre, mas nenhuma célula
///   vizinha é numérica
pub fn extract_single_value(
    grid: &Grid,
    label: &str,
    exclude: Option<&str>,
) -> Result<f64, ReportError> {
    let mut label_seen = false;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(text) = grid.cell_text(row, col) else {
                continue;
            };
            if !text.contains(label) {
                continue;
            }
            if let Some(excluded) = exclude {
                if text.contains(excluded) {
                    continue;
                }
            }
            label_seen = true;

            // Sonda abaixo e depois à direita do rótulo.
            for (delta_row, delta_col) in [(1, 0), (0, 1)] {
                if let Some(value) = grid.cell_number(row + delta_row, col + delta_col) {
                    tracing::debug!(valor = value, %label, "valor isolado extraído");
                    return Ok(value);
                }
            }
        }
    }

    if label_seen {
        Err(ReportError::section_empty(label))
    } else {
        Err(ReportError::section_not_found(label))
    }
}

/// Extrai as estratégias de destaque, até `cap` entradas.
pub fn extract_highlight_strategies(grid: &Grid, cap: usize) -> Result<Vec<String>, ReportError> {
    extract_filtered_list(
        grid,
        &ListScan {
            label: STRATEGY_LABEL,
            own_keyword: "destaque",
            row_window: STRATEGY_ROW_WINDOW,
            col_window: STRATEGY_COL_WINDOW,
            sign: None,
        },
        cap,
    )
}

/// Extrai os ativos promotores (percentual positivo), até `cap` entradas.
pub fn extract_promoter_assets(grid: &Grid, cap: usize) -> Result<Vec<String>, ReportError> {
    extract_filtered_list(
        grid,
        &ListScan {
            label: PROMOTER_LABEL,
            own_keyword: "promotor",
            row_window: ASSET_ROW_WINDOW,
            col_window: ASSET_COL_WINDOW,
            sign: Some(SignFilter::Positive),
        },
        cap,
    )
}

/// Extrai os ativos detratores (percentual negativo), até `cap` entradas.
pub fn extract_detractor_assets(grid: &Grid, cap: usize) -> Result<Vec<String>, ReportError> {
    extract_filtered_list(
        grid,
        &ListScan {
            label: DETRACTOR_LABEL,
            own_keyword: "detrator",
            row_window: ASSET_ROW_WINDOW,
            col_window: ASSET_COL_WINDOW,
            sign: Some(SignFilter::Negative),
        },
        cap,
    )
}

/// Primitiva de varredura das seções em lista.
///
/// Localiza o rótulo e varre `row_window` linhas abaixo dele, inspecionando
/// `col_window` colunas por linha. Células cujo texto em minúsculas contém
/// alguma palavra de cabeçalho de seção são rejeitadas, exceto a
/// palavra-chave da própria seção. Quando a seção exige sinal, a célula
/// precisa de um percentual entre parênteses com o sinal pedido; sem
/// percentual analisável, a célula é pulada. A varredura para ao juntar
/// `cap` entradas.
pub(crate) fn extract_filtered_list(
    grid: &Grid,
    scan: &ListScan,
    cap: usize,
) -> Result<Vec<String>, ReportError> {
    let label_match = grid
        .locate_label(scan.label)
        .ok_or_else(|| ReportError::section_not_found(scan.label))?;

    let start = label_match.row + LIST_DATA_OFFSET;
    let end = (start + scan.row_window).min(grid.rows());

    let mut entries = Vec::new();
    'scan: for row in start..end {
        for col in 0..scan.col_window {
            if entries.len() >= cap {
                break 'scan;
            }

            let Some(text) = grid.cell_text(row, col) else {
                continue;
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let lowered = trimmed.to_lowercase();
            if SECTION_KEYWORDS
                .iter()
                .any(|keyword| *keyword != scan.own_keyword && lowered.contains(keyword))
            {
                continue;
            }

            if let Some(sign) = scan.sign {
                let Some(percentage) = parse_parenthesized_percentage(trimmed) else {
                    continue;
                };
                let keep = match sign {
                    SignFilter::Positive => percentage > 0.0,
                    SignFilter::Negative => percentage < 0.0,
                };
                if !keep {
                    continue;
                }
            }

            entries.push(text);
        }
    }

    if entries.is_empty() {
        return Err(ReportError::section_empty(scan.label));
    }

    tracing::debug!(secao = scan.label, entradas = entries.len(), "lista extraída");
    Ok(entries)
}

/// Trecho numérico do percentual entre parênteses, como escrito na célula.
pub(crate) fn percentage_capture(text: &str) -> Option<&str> {
    PERCENTAGE_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Extrai o percentual entre parênteses de uma linha de ativo.
///
/// Aceita vírgula ou ponto decimal e sinal explícito: "FUNDO A (+7,83%)"
/// produz `7.83`. Sem percentual analisável, responde `None`.
pub(crate) fn parse_parenthesized_percentage(text: &str) -> Option<f64> {
    let raw = percentage_capture(text)?;
    raw.replace(',', ".").parse::<f64>().ok()
}
