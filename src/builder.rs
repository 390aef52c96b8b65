//! Módulo Builder
//!
//! Builder fluente da configuração de geração e o gerador de relatórios que
//! orquestra extração, renderização e agregação por cliente.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::api::MissingDifference;
use crate::config::{ClientConfig, PortfolioConfig};
use crate::error::ReportError;
use crate::extractor::{
    extract_detractor_assets, extract_financial_return, extract_highlight_strategies,
    extract_performance, extract_promoter_assets,
};
use crate::grid::Grid;
use crate::output;
use crate::parser::WorkbookReader;
use crate::types::PortfolioData;

/// Configuração de uma geração de relatórios.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Data de referência do relatório. Define o nome do mês exibido e a
    /// data no nome dos arquivos.
    pub reference_date: NaiveDate,

    /// Máximo de estratégias de destaque por carteira.
    pub strategy_cap: usize,

    /// Máximo de ativos promotores e de detratores por carteira.
    pub asset_cap: usize,

    /// Tratamento da coluna de diferença ausente.
    pub missing_difference: MissingDifference,

    /// Texto do bloco "Principais indicadores", quando houver.
    pub market_indicators: Option<String>,

    /// Base do link da carta mensal.
    pub letter_base_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_date: chrono::Local::now().date_naive(),
            strategy_cap: 2,
            asset_cap: 2,
            missing_difference: MissingDifference::default(),
            market_indicators: None,
            letter_base_url: "https://www.mmzrfo.com.br/post".to_string(),
        }
    }
}

/// Builder fluente do [`ReportGenerator`].
///
/// Todos os campos têm padrão; apenas o necessário é sobrescrito.
///
/// # Exemplos
///
/// ```rust
/// use chrono::NaiveDate;
/// use mmzr_report::ReportBuilder;
///
/// # fn main() -> Result<(), mmzr_report::ReportError> {
/// let generator = ReportBuilder::new()
///     .with_reference_date(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap())
///     .with_asset_cap(3)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    /// Cria um builder com a configuração padrão.
    ///
    /// # Padrões
    ///
    /// - Data de referência: hoje
    /// - Estratégias de destaque: até 2
    /// - Ativos promotores/detratores: até 2 de cada
    /// - Diferença ausente: calculada (carteira - benchmark)
    /// - Indicadores de mercado: omitidos
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
        }
    }

    /// Define a data de referência do relatório.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.config.reference_date = date;
        self
    }

    /// Limita a quantidade de estratégias de destaque por carteira.
    pub fn with_strategy_cap(mut self, cap: usize) -> Self {
        self.config.strategy_cap = cap;
        self
    }

    /// Limita a quantidade de ativos promotores e detratores por carteira.
    pub fn with_asset_cap(mut self, cap: usize) -> Self {
        self.config.asset_cap = cap;
        self
    }

    /// Define o tratamento da coluna de diferença ausente.
    pub fn with_missing_difference(mut self, mode: MissingDifference) -> Self {
        self.config.missing_difference = mode;
        self
    }

    /// Define o texto do bloco "Principais indicadores".
    pub fn with_market_indicators(mut self, indicators: impl Into<String>) -> Self {
        self.config.market_indicators = Some(indicators.into());
        self
    }

    /// Define a base do link da carta mensal.
    pub fn with_letter_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.letter_base_url = base_url.into();
        self
    }

    /// Valida a configuração e constrói o gerador.
    ///
    /// # Erros
    ///
    /// [`ReportError::Config`] quando algum limite é zero ou a base do link
    /// da carta está vazia.
    pub fn build(self) -> Result<ReportGenerator, ReportError> {
        if self.config.strategy_cap == 0 {
            return Err(ReportError::Config(
                "limite de estratégias deve ser ao menos 1".to_string(),
            ));
        }
        if self.config.asset_cap == 0 {
            return Err(ReportError::Config(
                "limite de ativos deve ser ao menos 1".to_string(),
            ));
        }
        if self.config.letter_base_url.trim().is_empty() {
            return Err(ReportError::Config(
                "base do link da carta mensal vazia".to_string(),
            ));
        }

        Ok(ReportGenerator {
            config: self.config,
        })
    }
}

/// Gerador de relatórios mensais.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Configuração em uso.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assunto do e-mail para a data de referência configurada.
    pub fn email_subject(&self) -> String {
        output::email_subject(self.config.reference_date)
    }

    /// Extrai as cinco seções obrigatórias de uma carteira.
    ///
    /// Qualquer seção ausente falha a carteira inteira com o erro nomeado da
    /// seção; nenhum dado substituto é gerado.
    pub fn extract_portfolio(
        &self,
        grid: &Grid,
        portfolio: &PortfolioConfig,
    ) -> Result<PortfolioData, ReportError> {
        let performance = extract_performance(
            grid,
            self.config.reference_date,
            self.config.missing_difference,
        )?;
        let financial_return = extract_financial_return(grid)?;
        let highlight_strategies = extract_highlight_strategies(grid, self.config.strategy_cap)?;
        let promoter_assets = extract_promoter_assets(grid, self.config.asset_cap)?;
        let detractor_assets = extract_detractor_assets(grid, self.config.asset_cap)?;

        Ok(PortfolioData {
            name: portfolio.name.clone(),
            kind: portfolio.kind.clone(),
            comment: portfolio.comment.clone(),
            performance,
            financial_return,
            highlight_strategies,
            promoter_assets,
            detractor_assets,
        })
    }

    /// Gera o e-mail HTML de um cliente a partir da planilha aberta.
    ///
    /// As abas são carregadas em sequência e a extração das carteiras roda
    /// no pool do rayon; a ordem das carteiras no e-mail segue a ordem da
    /// configuração. Uma carteira que falha é registrada pelo nome e
    /// descartada; as demais seguem de forma independente.
    ///
    /// # Erros
    ///
    /// * [`ReportError::Config`] se o cliente não tem carteiras configuradas
    /// * [`ReportError::EmptyReport`] se nenhuma carteira produziu dados
    pub fn generate_client_report(
        &self,
        workbook: &mut WorkbookReader,
        client: &ClientConfig,
    ) -> Result<String, ReportError> {
        if client.portfolios.is_empty() {
            return Err(ReportError::Config(format!(
                "cliente '{}' sem carteiras configuradas",
                client.name
            )));
        }

        // 1. Carrega as abas em sequência (o leitor é mutável).
        let mut loaded: Vec<(&PortfolioConfig, Grid)> = Vec::new();
        for portfolio in &client.portfolios {
            match workbook.load_grid(&portfolio.sheet_name) {
                Ok(grid) => loaded.push((portfolio, grid)),
                Err(error) => {
                    tracing::error!(
                        carteira = %portfolio.name,
                        erro = %error,
                        "não foi possível carregar a aba da carteira"
                    );
                }
            }
        }

        // 2. Extrai as carteiras em paralelo, preservando a ordem.
        let portfolios: Vec<PortfolioData> = loaded
            .par_iter()
            .filter_map(|(portfolio, grid)| match self.extract_portfolio(grid, portfolio) {
                Ok(data) => Some(data),
                Err(error) => {
                    tracing::error!(
                        carteira = %portfolio.name,
                        erro = %error,
                        "não foi possível gerar o relatório da carteira"
                    );
                    None
                }
            })
            .collect();

        if portfolios.is_empty() {
            return Err(ReportError::EmptyReport(client.name.clone()));
        }

        tracing::info!(
            cliente = %client.name,
            carteiras = portfolios.len(),
            "relatório renderizado"
        );
        Ok(output::render_email(
            &client.name,
            self.config.reference_date,
            &portfolios,
            self.config.market_indicators.as_deref(),
            &self.config.letter_base_url,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn number(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
    }

    /// Aba completa com as cinco seções no leiaute usual.
    fn full_grid() -> Grid {
        Grid::from_rows(vec![
            vec![text("Performance")],
            vec![],
            vec![text("Mês atual"), number(2.38), number(1.45), number(0.93)],
            vec![text("No ano"), number(8.76), number(5.32), number(3.44)],
            vec![],
            vec![text("Retorno Financeiro")],
            vec![number(15234.56)],
            vec![text("Estratégias de Destaque")],
            vec![text("Renda fixa pós-fixada")],
            vec![text("Bolsa Brasil")],
            vec![text("Ativos Promotores")],
            vec![text("FUNDO A (+7,83%)")],
            vec![text("FUNDO B (+1,10%)")],
            vec![text("Ativos Detratores")],
            vec![text("FUNDO C (-2,00%)")],
        ])
    }

    fn portfolio_config() -> PortfolioConfig {
        PortfolioConfig {
            name: "Carteira Moderada".to_string(),
            kind: "Renda Variável + Renda Fixa".to_string(),
            sheet_name: "Base Consolidada".to_string(),
            benchmark_name: "IPCA+5%".to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let generator = ReportBuilder::new().build().unwrap();
        assert_eq!(generator.config().strategy_cap, 2);
        assert_eq!(generator.config().asset_cap, 2);
        assert_eq!(
            generator.config().missing_difference,
            MissingDifference::Computed
        );
        assert!(generator.config().market_indicators.is_none());
    }

    #[test]
    fn test_builder_rejects_zero_caps() {
        assert!(matches!(
            ReportBuilder::new().with_asset_cap(0).build(),
            Err(ReportError::Config(_))
        ));
        assert!(matches!(
            ReportBuilder::new().with_strategy_cap(0).build(),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn test_builder_rejects_empty_letter_url() {
        assert!(matches!(
            ReportBuilder::new().with_letter_base_url("  ").build(),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn test_email_subject_uses_reference_date() {
        let generator = ReportBuilder::new()
            .with_reference_date(reference())
            .build()
            .unwrap();
        assert!(generator.email_subject().contains("Maio de 2025"));
    }

    #[test]
    fn test_extract_portfolio_all_sections() {
        let generator = ReportBuilder::new()
            .with_reference_date(reference())
            .build()
            .unwrap();

        let data = generator
            .extract_portfolio(&full_grid(), &portfolio_config())
            .unwrap();

        assert_eq!(data.name, "Carteira Moderada");
        assert_eq!(data.performance.len(), 2);
        assert_eq!(data.financial_return, 15234.56);
        assert_eq!(data.highlight_strategies.len(), 2);
        assert_eq!(data.promoter_assets, vec!["FUNDO A (+7,83%)", "FUNDO B (+1,10%)"]);
        assert_eq!(data.detractor_assets, vec!["FUNDO C (-2,00%)"]);
    }

    #[test]
    fn test_extract_portfolio_fails_on_missing_mandatory_section() {
        let generator = ReportBuilder::new()
            .with_reference_date(reference())
            .build()
            .unwrap();

        // Sem "Ativos Detratores" a carteira inteira falha.
        let grid = Grid::from_rows(vec![
            vec![text("Performance")],
            vec![],
            vec![text("Mês atual"), number(2.38), number(1.45)],
            vec![text("Retorno Financeiro"), number(10.0)],
            vec![text("Estratégias de Destaque")],
            vec![text("Renda fixa pós-fixada")],
            vec![text("Ativos Promotores")],
            vec![text("FUNDO A (+7,83%)")],
        ]);

        match generator.extract_portfolio(&grid, &portfolio_config()) {
            Err(ReportError::SectionNotFound { label }) => {
                assert_eq!(label, "Ativos Detratores");
            }
            other => panic!("esperava SectionNotFound, obtive {:?}", other),
        }
    }

    #[test]
    fn test_extract_portfolio_respects_caps() {
        let generator = ReportBuilder::new()
            .with_reference_date(reference())
            .with_asset_cap(1)
            .with_strategy_cap(1)
            .build()
            .unwrap();

        let data = generator
            .extract_portfolio(&full_grid(), &portfolio_config())
            .unwrap();

        assert_eq!(data.highlight_strategies.len(), 1);
        assert_eq!(data.promoter_assets.len(), 1);
        assert_eq!(data.detractor_assets.len(), 1);
    }
}
