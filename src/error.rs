//! Módulo de Erros
//!
//! Define o tipo de erro estruturado usado por todo o crate, construído com
//! `thiserror` para conversão automática e formatação das mensagens.

use thiserror::Error;

/// Erro usado em todo o crate mmzr-report.
///
/// Cobre a leitura da planilha, a extração das seções e a camada de
/// geração/entrega do relatório.
///
/// # Variantes de extração
///
/// A extração de uma seção obrigatória falha de forma explícita, nunca com
/// dados substituídos em silêncio:
///
/// - `SectionNotFound`: o rótulo da seção não ocorre em nenhuma célula da aba.
/// - `SectionEmpty`: o rótulo foi localizado, mas a janela de varredura não
///   produziu nenhum registro válido.
///
/// Linhas com valores não numéricos dentro da janela são descartadas uma a
/// uma durante a varredura e não geram erro por si só.
///
/// # Exemplos
///
/// ```rust
/// use mmzr_report::{Grid, ReportError};
///
/// let grid = Grid::from_rows(vec![vec![]]);
/// match mmzr_report::extract_financial_return(&grid) {
///     Err(ReportError::SectionNotFound { label }) => {
///         assert_eq!(label, "Retorno Financeiro");
///     }
///     _ => panic!("esperava SectionNotFound"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// Erro de E/S ao ler a planilha ou gravar o relatório.
    ///
    /// Convertido automaticamente de `std::io::Error` via `#[from]`.
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// Erro do calamine ao abrir ou ler o arquivo Excel.
    #[error("Falha ao ler a planilha Excel: {0}")]
    Parse(#[from] calamine::Error),

    /// Erro de serialização/desserialização da configuração JSON.
    #[error("Erro na configuração JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// O rótulo da seção não foi encontrado em nenhuma célula da aba.
    #[error("Seção '{label}' não encontrada na planilha")]
    SectionNotFound {
        /// Rótulo procurado (ex.: "Performance", "Ativos Promotores").
        label: String,
    },

    /// O rótulo foi encontrado, mas nenhuma linha da janela de varredura
    /// produziu um registro válido.
    #[error("Seção '{label}' encontrada, mas sem dados válidos")]
    SectionEmpty {
        /// Rótulo da seção localizada.
        label: String,
    },

    /// A aba configurada para a carteira não existe na planilha.
    #[error("Aba '{0}' não encontrada na planilha")]
    SheetNotFound(String),

    /// Nenhuma carteira do cliente produziu dados válidos.
    #[error("Nenhuma carteira válida para o cliente '{0}'")]
    EmptyReport(String),

    /// Configuração inválida detectada em `ReportBuilder::build()` ou ao
    /// carregar o arquivo de configuração.
    #[error("Erro de configuração: {0}")]
    Config(String),

    /// Falha ao abrir o compositor de e-mail da plataforma.
    #[error("Falha ao acionar o cliente de e-mail: {0}")]
    Dispatch(String),
}

impl ReportError {
    /// Cria um `SectionNotFound` para o rótulo informado.
    pub(crate) fn section_not_found(label: &str) -> Self {
        ReportError::SectionNotFound {
            label: label.to_string(),
        }
    }

    /// Cria um `SectionEmpty` para o rótulo informado.
    pub(crate) fn section_empty(label: &str) -> Self {
        ReportError::SectionEmpty {
            label: label.to_string(),
        }
    }
}
