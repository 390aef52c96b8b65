//! mmzr-report - Gerador de relatórios mensais de performance
//!
//! Este crate lê a planilha de rentabilidade dos clientes, localiza as
//! seções do relatório por varredura heurística da grade de células e gera
//! o e-mail HTML mensal de cada cliente.
//!
//! A planilha não tem esquema fixo: cada seção é encontrada pelo rótulo em
//! português ("Performance", "Retorno Financeiro", "Estratégias de
//! Destaque", "Ativos Promotores", "Ativos Detratores") e os dados são
//! lidos de deslocamentos fixos em volta do rótulo. Seção obrigatória
//! ausente derruba a carteira com erro nomeado; o relatório nunca sai com
//! dados substitutos.
//!
//! # Uso rápido
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mmzr_report::{CellValue, Grid, MissingDifference};
//!
//! # fn main() -> Result<(), mmzr_report::ReportError> {
//! let grid = Grid::from_rows(vec![
//!     vec![CellValue::Text("Performance".to_string())],
//!     vec![],
//!     vec![
//!         CellValue::Text("Mês atual".to_string()),
//!         CellValue::Number(2.38),
//!         CellValue::Number(1.45),
//!     ],
//! ]);
//!
//! let reference = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
//! let records =
//!     mmzr_report::extract_performance(&grid, reference, MissingDifference::Computed)?;
//! assert_eq!(records[0].period, "Maio:");
//! # Ok(())
//! # }
//! ```
//!
//! # Do arquivo ao e-mail
//!
//! ```rust,no_run
//! use mmzr_report::{ReportBuilder, RunConfig, WorkbookReader};
//!
//! fn main() -> Result<(), mmzr_report::ReportError> {
//!     let run = RunConfig::load("mmzr_config.json")?;
//!     let generator = ReportBuilder::new().build()?;
//!
//!     let mut workbook = WorkbookReader::open(&run.workbook_path)?;
//!     for client in &run.clients {
//!         let html = generator.generate_client_report(&mut workbook, client)?;
//!         mmzr_report::save_report(
//!             &html,
//!             &client.name,
//!             generator.config().reference_date,
//!             &run.output_dir,
//!         )?;
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod config;
mod dispatch;
mod error;
mod extractor;
mod formatter;
mod grid;
mod output;
mod parser;
mod storage;
mod types;

pub use api::MissingDifference;
pub use builder::{ReportBuilder, ReportConfig, ReportGenerator};
pub use config::{ClientConfig, PortfolioConfig, RunConfig};
pub use dispatch::{LoggingDispatcher, MailClientDispatcher, ReportDispatcher};
pub use error::ReportError;
pub use extractor::{
    extract_detractor_assets, extract_financial_return, extract_highlight_strategies,
    extract_performance, extract_promoter_assets, extract_single_value, DETRACTOR_LABEL,
    FINANCIAL_RETURN_LABEL, PERFORMANCE_LABEL, PROMOTER_LABEL, STRATEGY_LABEL,
};
pub use formatter::{format_currency, format_percentage, format_reference_date, month_name_pt};
pub use grid::Grid;
pub use output::{email_subject, render_email};
pub use parser::WorkbookReader;
pub use storage::save_report;
pub use types::{CellValue, LabelMatch, PerformanceRecord, PortfolioData};
