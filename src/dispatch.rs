//! Módulo Dispatch
//!
//! Entrega do relatório gerado. A capacidade de envio é uma interface com
//! duas implementações, escolhida por injeção na inicialização: o compositor
//! de e-mail da plataforma ou a simulação registrada em log. Nenhuma decisão
//! de sistema operacional acontece fora deste módulo.

use std::path::Path;

use crate::error::ReportError;

/// Capacidade de entrega de um relatório gerado.
pub trait ReportDispatcher {
    /// Entrega (ou simula a entrega de) um relatório salvo em `report_path`.
    fn dispatch(
        &self,
        recipient: &str,
        subject: &str,
        report_path: &Path,
    ) -> Result<(), ReportError>;
}

/// Abre o compositor de e-mail padrão da plataforma com destinatário e
/// assunto preenchidos.
///
/// Compositor via `mailto:` não carrega corpo HTML; o arquivo do relatório
/// também é aberto para o operador colar o conteúdo.
pub struct MailClientDispatcher;

impl ReportDispatcher for MailClientDispatcher {
    fn dispatch(
        &self,
        recipient: &str,
        subject: &str,
        report_path: &Path,
    ) -> Result<(), ReportError> {
        let mailto = format!(
            "mailto:{}?subject={}",
            recipient,
            encode_mailto_component(subject)
        );

        open::that(&mailto).map_err(|e| ReportError::Dispatch(e.to_string()))?;
        open::that(report_path).map_err(|e| ReportError::Dispatch(e.to_string()))?;

        tracing::info!(
            destinatario = recipient,
            arquivo = %report_path.display(),
            "compositor de e-mail aberto"
        );
        Ok(())
    }
}

/// Simulação de envio: registra em log o que seria enviado.
///
/// Usada nos ambientes sem cliente de e-mail e nas execuções de homologação.
pub struct LoggingDispatcher;

impl ReportDispatcher for LoggingDispatcher {
    fn dispatch(
        &self,
        recipient: &str,
        subject: &str,
        report_path: &Path,
    ) -> Result<(), ReportError> {
        tracing::info!(
            destinatario = recipient,
            assunto = subject,
            arquivo = %report_path.display(),
            "envio simulado"
        );
        Ok(())
    }
}

/// Codifica um componente de URL `mailto:` por percent-encoding.
fn encode_mailto_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_mailto_component() {
        assert_eq!(encode_mailto_component("Relatorio"), "Relatorio");
        assert_eq!(encode_mailto_component("a b"), "a%20b");
        assert_eq!(
            encode_mailto_component("Relatório Mensal"),
            "Relat%C3%B3rio%20Mensal"
        );
    }

    #[test]
    fn test_logging_dispatcher_always_succeeds() {
        let dispatcher = LoggingDispatcher;
        let result = dispatcher.dispatch(
            "cliente@example.com",
            "Relatório Mensal",
            Path::new("relatorio.html"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_dispatcher_as_trait_object() {
        let dispatcher: Box<dyn ReportDispatcher> = Box::new(LoggingDispatcher);
        assert!(dispatcher
            .dispatch("a@b.com", "Assunto", Path::new("x.html"))
            .is_ok());
    }
}
