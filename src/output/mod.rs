//! Módulo Output
//!
//! Renderização do relatório extraído em e-mail HTML. A camada de
//! renderização consome os registros estruturados como dados puros: é aqui
//! que a lista bruta de performance é filtrada para os dois períodos
//! canônicos e que os sinais dos percentuais são normalizados para exibição.

mod html;

pub use html::{email_subject, render_email};
