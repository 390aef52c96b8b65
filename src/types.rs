//! Módulo de Tipos
//!
//! Define os tipos de dados comuns usados por todo o crate: valores de
//! célula, localização de rótulos e os registros estruturados extraídos da
//! planilha.

/// Valor de uma célula da planilha.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Valor numérico (f64). Datas seriais do Excel também chegam aqui.
    Number(f64),

    /// Texto.
    Text(String),

    /// Valor lógico.
    Bool(bool),

    /// Valor de erro da planilha (ex.: #DIV/0!).
    Error(String),

    /// Célula vazia ou ausente.
    Empty,
}

impl CellValue {
    /// Indica se a célula está vazia.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Forma textual da célula, sem formatação aplicada.
    ///
    /// Células vazias não têm forma textual: o chamador decide se uma
    /// string vazia faz sentido no contexto dele.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Error(e) => Some(e.clone()),
            CellValue::Empty => None,
        }
    }

    /// Forma numérica da célula, quando coercível.
    ///
    /// Texto numérico é aceito com vírgula ou ponto decimal ("2,38" e
    /// "2.38" produzem o mesmo valor). Valores lógicos e de erro não são
    /// coercíveis.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let normalized = s.trim().replace(',', ".");
                normalized.parse::<f64>().ok()
            }
            _ => None,
        }
    }
}

/// Posição (linha, coluna) onde um rótulo de seção foi localizado.
///
/// Produzida por [`crate::Grid::locate_label`]. Quando o rótulo ocorre em
/// mais de uma célula, vale a primeira na ordem de varredura por linhas
/// (linha crescente e, dentro da linha, coluna crescente).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch {
    /// Linha da célula (0 em diante).
    pub row: usize,
    /// Coluna da célula (0 em diante).
    pub col: usize,
}

/// Registro de performance de um período da carteira.
///
/// As linhas brutas extraídas da seção "Performance" chegam nesta forma; o
/// filtro para os dois períodos canônicos (mês atual e "No ano") acontece na
/// camada de renderização.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    /// Rótulo do período já reescrito (ex.: "Maio:" ou "No ano:").
    pub period: String,

    /// Retorno da carteira no período, em percentual.
    pub portfolio_return: f64,

    /// Retorno do benchmark no período, em percentual.
    pub benchmark_return: f64,

    /// Diferença carteira menos benchmark, em pontos percentuais.
    pub relative_difference: f64,
}

/// Dados extraídos de uma carteira (uma aba da planilha).
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioData {
    /// Nome da carteira, vindo da configuração do cliente.
    pub name: String,

    /// Tipo da carteira (ex.: "Renda Variável + Renda Fixa").
    pub kind: String,

    /// Comentário livre do banker para esta carteira.
    pub comment: String,

    /// Linhas de performance extraídas, na ordem de descoberta.
    pub performance: Vec<PerformanceRecord>,

    /// Retorno financeiro do período, em reais.
    pub financial_return: f64,

    /// Estratégias de destaque.
    pub highlight_strategies: Vec<String>,

    /// Ativos promotores (percentual positivo).
    pub promoter_assets: Vec<String>,

    /// Ativos detratores (percentual negativo).
    pub detractor_assets: Vec<String>,
}
