//! Módulo de Configuração
//!
//! Configuração de execução em JSON: caminho da planilha de rentabilidade e
//! a lista de clientes com suas carteiras. O formato é o mesmo gravado pelo
//! formulário de configuração usado pelos bankers (`mmzr_config.json`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

fn default_kind() -> String {
    "Diversificada".to_string()
}

fn default_benchmark() -> String {
    "IPCA+5%".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("relatorios")
}

/// Configuração de uma carteira de um cliente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Nome exibido no relatório.
    pub name: String,

    /// Tipo da carteira (ex.: "Renda Fixa").
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Aba da planilha com os dados desta carteira.
    pub sheet_name: String,

    /// Benchmark de referência da carteira.
    #[serde(default = "default_benchmark")]
    pub benchmark_name: String,

    /// Comentário livre do banker, agregado nas observações do e-mail.
    #[serde(rename = "comentarios", default)]
    pub comment: String,
}

/// Configuração de um cliente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Nome do cliente.
    pub name: String,

    /// E-mail do destinatário. Vazio desativa o envio.
    #[serde(default)]
    pub email: String,

    /// Carteiras do cliente, na ordem de exibição no relatório.
    #[serde(default)]
    pub portfolios: Vec<PortfolioConfig>,
}

/// Configuração de uma execução em lote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Caminho da planilha de rentabilidade (.xlsx ou .xlsm).
    #[serde(rename = "excel_path")]
    pub workbook_path: PathBuf,

    /// Diretório onde os relatórios HTML são gravados.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Clientes do lote.
    pub clients: Vec<ClientConfig>,
}

impl RunConfig {
    /// Carrega e valida a configuração de um arquivo JSON.
    ///
    /// # Erros
    ///
    /// * [`ReportError::Io`] se o arquivo não pode ser lido
    /// * [`ReportError::Json`] se o JSON é inválido
    /// * [`ReportError::Config`] se a configuração carregada é inconsistente
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: RunConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Valida a consistência da configuração.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.workbook_path.as_os_str().is_empty() {
            return Err(ReportError::Config(
                "caminho da planilha não informado".to_string(),
            ));
        }
        if self.clients.is_empty() {
            return Err(ReportError::Config(
                "nenhum cliente configurado".to_string(),
            ));
        }
        for client in &self.clients {
            if client.name.trim().is_empty() {
                return Err(ReportError::Config("cliente sem nome".to_string()));
            }
            for portfolio in &client.portfolios {
                if portfolio.sheet_name.trim().is_empty() {
                    return Err(ReportError::Config(format!(
                        "carteira '{}' do cliente '{}' sem aba configurada",
                        portfolio.name, client.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Localiza um cliente pelo nome ou e-mail, ignorando espaços nas pontas.
    pub fn find_client(&self, name_or_email: &str) -> Option<&ClientConfig> {
        let needle = name_or_email.trim();
        self.clients
            .iter()
            .find(|c| c.name.trim() == needle || c.email.trim() == needle)
    }
}
