//! Módulo Storage
//!
//! Gravação dos relatórios HTML em disco, um arquivo por cliente e data de
//! referência.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::ReportError;

/// Grava o relatório HTML de um cliente.
///
/// O diretório de saída é criado se necessário. O nome do arquivo é
/// `relatorio_mensal_{cliente}_{aaaammdd}.html`, com o nome do cliente
/// saneado para uso em nome de arquivo.
///
/// # Retorno
///
/// O caminho do arquivo gravado.
pub fn save_report(
    html: &str,
    client_name: &str,
    reference: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(output_dir)?;

    let file_name = format!(
        "relatorio_mensal_{}_{}.html",
        sanitize_client_name(client_name),
        reference.format("%Y%m%d")
    );
    let path = output_dir.join(file_name);

    fs::write(&path, html)?;
    tracing::info!(arquivo = %path.display(), "relatório salvo");
    Ok(path)
}

/// Saneia o nome do cliente para uso em nome de arquivo.
///
/// Mantém caracteres alfanuméricos (acentos incluídos) e troca o restante
/// por sublinhado.
pub(crate) fn sanitize_client_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
