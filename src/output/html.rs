//! Montagem do e-mail HTML no leiaute dos relatórios mensais: cabeçalho com
//! o mês de referência, um bloco por carteira (tabela de performance,
//! estratégias, promotores e detratores), observações, indicadores e o botão
//! da carta mensal. Tabelas aninhadas e estilos inline mantêm o leiaute
//! estável nos clientes de e-mail.

use chrono::{Datelike, NaiveDate};

use crate::extractor::{parse_parenthesized_percentage, percentage_capture};
use crate::formatter::{
    format_currency, format_percentage, format_reference_date, month_name_pt, MONTH_NAMES_PT,
};
use crate::types::{PerformanceRecord, PortfolioData};

/// Assunto do e-mail do relatório.
pub fn email_subject(reference: NaiveDate) -> String {
    format!(
        "MMZR Family Office - Relatório Mensal de Performance - {} de {}",
        month_name_pt(reference.month()),
        reference.year()
    )
}

/// Renderiza o e-mail completo de um cliente.
///
/// # Argumentos
///
/// * `client_name` - nome do cliente na saudação
/// * `reference` - data de referência do relatório
/// * `portfolios` - carteiras já extraídas, na ordem de exibição
/// * `market_indicators` - texto do bloco "Principais indicadores", se houver
/// * `letter_base_url` - base do link da carta mensal
pub fn render_email(
    client_name: &str,
    reference: NaiveDate,
    portfolios: &[PortfolioData],
    market_indicators: Option<&str>,
    letter_base_url: &str,
) -> String {
    let month = month_name_pt(reference.month());
    let year = reference.year();

    let mut html = String::with_capacity(16 * 1024);
    html.push_str(&render_header(month, year));

    html.push_str(&format!(
        r#"                    <tr>
                        <td class="section-bg" style="padding: 20px 20px; background-color: #ffffff;">
                            <h2 style="font-size: 15px; color: #0D2035; margin-bottom: 12px; margin-top: 0;">Olá {},</h2>
                            <p style="margin-top: 0; margin-bottom: 9px;">Segue o relatório mensal com o desempenho de suas carteiras referente a <strong>{}</strong>.</p>
"#,
        client_name,
        format_reference_date(reference)
    ));

    for portfolio in portfolios {
        html.push_str(&render_portfolio_section(portfolio));
    }

    // Comentários das carteiras agregados em um único bloco de observações.
    let comments: Vec<&str> = portfolios
        .iter()
        .map(|p| p.comment.trim())
        .filter(|c| !c.is_empty())
        .collect();
    html.push_str(&render_notes(&comments.join(" | ")));

    if let Some(indicators) = market_indicators {
        html.push_str(&render_indicators(indicators));
    }
    html.push_str(&render_letter_button(month, year, letter_base_url));

    html.push_str(&render_footer(year));
    html
}

/// Cabeçalho do documento: head com os ajustes de tema claro e a faixa com o
/// título do relatório.
fn render_header(month: &str, year: i32) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="color-scheme" content="light">
    <meta name="supported-color-schemes" content="light">
    <!--[if mso]>
    <style type="text/css">
    body, table, td {font-family: Arial, Helvetica, sans-serif !important;}
    </style>
    <![endif]-->
    <style>
    :root {
        color-scheme: light;
        supported-color-schemes: light;
    }
    @media (prefers-color-scheme: dark) {
        body, .body-wrapper { background-color: #f4f4f4 !important; }
        .content-wrapper { background-color: #ffffff !important; color: #333333 !important; }
        .header-bg, .portfolio-header { background-color: #0D2035 !important; }
        .header-text { color: #ffffff !important; }
        .section-bg, .data-table { background-color: #ffffff !important; }
        .table-header { background-color: #f8f9fa !important; color: #0D2035 !important; }
        .performance-header { color: #0D2035 !important; border-bottom-color: #e0e0e0 !important; }
        .highlight-section { background-color: #f8f9fa !important; }
        .promoters-section { background-color: #e8f5e9 !important; }
        .detractors-section { background-color: #ffebee !important; }
        td, th, p, h1, h2, h3, h4, h5, h6, li { color: inherit !important; }
    }
    </style>
</head>
<body class="body-wrapper" style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Helvetica', 'Arial', sans-serif; line-height: 1.4; color: #333333; background-color: #f4f4f4;">
    <table role="presentation" style="width: 100%; border-collapse: collapse; border: 0; border-spacing: 0; background: #f4f4f4;">
        <tr>
            <td align="center" style="padding: 0;">
                <table role="presentation" class="content-wrapper" style="width: 100%; max-width: 800px; border-collapse: collapse; border: 0; border-spacing: 0; text-align: left; background: #ffffff; box-shadow: 0 2px 10px rgba(0,0,0,0.1);">
                    <tr>
                        <td style="padding: 0;">
                            <table role="presentation" class="header-bg" style="width: 100%; border-collapse: collapse; background: #0D2035;">
                                <tr>
                                    <td style="padding: 10px 15px;">
"#,
    );
    html.push_str(&format!(
        r#"                                        <p class="header-text" style="margin: 0; font-size: 21px; color: #ffffff; opacity: 0.9; line-height: 1.2;">MMZR Family Office</p>
                                        <p class="header-text" style="margin: 0; font-size: 14px; color: #ffffff; opacity: 0.9; line-height: 1.2;">Relatório Mensal de Performance - {} de {}</p>
"#,
        month, year
    ));
    html.push_str(
        r#"                                    </td>
                                </tr>
                            </table>
                        </td>
                    </tr>
"#,
    );
    html
}

/// Bloco de uma carteira: faixa com nome e tipo, seguida das quatro seções.
fn render_portfolio_section(portfolio: &PortfolioData) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"                            <table role="presentation" style="width: 100%; margin: 20px 0 0 0; border: 1px solid #e0e0e0; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1); background-color: #ffffff;">
                                <tr>
                                    <td class="header-bg portfolio-header" style="background-color: #0D2035; color: #ffffff; padding: 10px 15px;">
                                        <h3 style="margin: 0; font-size: 16px; font-weight: 500;">{} <span style="font-weight: 300; font-size: 13px; margin-left: 8px; opacity: 0.8;">| {}</span></h3>
                                    </td>
                                </tr>
                                <tr>
                                    <td class="section-bg" style="padding: 15px; background-color: #ffffff;">
"#,
        portfolio.name, portfolio.kind
    ));

    html.push_str(&render_performance_table(
        &portfolio.performance,
        portfolio.financial_return,
    ));
    html.push_str(&render_list_section(
        "Estratégias de Destaque",
        "highlight-section",
        "#f8f9fa",
        "#333333",
        &portfolio.highlight_strategies,
        false,
    ));
    html.push_str(&render_list_section(
        "Ativos Promotores",
        "promoters-section",
        "#e8f5e9",
        "#2e7d32",
        &portfolio.promoter_assets,
        true,
    ));
    html.push_str(&render_list_section(
        "Ativos Detratores",
        "detractors-section",
        "#ffebee",
        "#c62828",
        &portfolio.detractor_assets,
        false,
    ));

    html.push_str(
        r#"                                    </td>
                                </tr>
                            </table>
"#,
    );
    html
}

/// Filtra a lista bruta de performance para os dois períodos canônicos.
///
/// Mantém a primeira linha de mês (rótulo terminado em ":" contendo um nome
/// de mês) e a primeira linha "No ano", na ordem em que foram descobertas, e
/// para assim que ambas existem. O corte em dois registros acontece aqui, e
/// não na extração.
pub(crate) fn filter_canonical_periods(
    records: &[PerformanceRecord],
) -> Vec<&PerformanceRecord> {
    let mut filtered = Vec::with_capacity(2);
    let mut month_added = false;
    let mut year_added = false;

    for record in records {
        let lowered = record.period.to_lowercase();

        let is_month = lowered.contains(':')
            && MONTH_NAMES_PT
                .iter()
                .any(|m| lowered.contains(&m.to_lowercase()));

        if is_month && !month_added {
            filtered.push(record);
            month_added = true;
        } else if lowered.contains("no ano") && !year_added {
            filtered.push(record);
            year_added = true;
        }

        if month_added && year_added {
            break;
        }
    }

    filtered
}

/// Cor de exibição de um valor: verde positivo, vermelho negativo, neutro
/// para zero.
fn value_color(value: f64) -> &'static str {
    if value > 0.0 {
        "#28a745"
    } else if value < 0.0 {
        "#dc3545"
    } else {
        "#333333"
    }
}

/// Tabela de performance com a linha de retorno financeiro ao final.
fn render_performance_table(records: &[PerformanceRecord], financial_return: f64) -> String {
    let mut html = String::new();
    html.push_str(
        r#"                                        <h4 class="performance-header" style="font-size: 18px; color: #0D2035; margin: 0 0 12px 0; font-weight: 500; border-bottom: 1px solid #e0e0e0; padding-bottom: 8px;">Performance</h4>
                                        <table role="presentation" class="data-table" style="width: 100%; border-collapse: collapse; font-size: 13px; margin-bottom: 15px; background-color: #ffffff;">
                                            <thead>
                                                <tr>
                                                    <th class="table-header" style="background-color: #f8f9fa; color: #0D2035; font-weight: 600; padding: 8px 6px; text-align: left; border-bottom: 1px solid #dee2e6;">Período</th>
                                                    <th class="table-header" style="background-color: #f8f9fa; color: #0D2035; font-weight: 600; padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6;">Carteira</th>
                                                    <th class="table-header" style="background-color: #f8f9fa; color: #0D2035; font-weight: 600; padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6;">Benchmark</th>
                                                    <th class="table-header" style="background-color: #f8f9fa; color: #0D2035; font-weight: 600; padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6;">Carteira vs. Benchmark</th>
                                                </tr>
                                            </thead>
                                            <tbody>
"#,
    );

    for record in filter_canonical_periods(records) {
        // A diferença é exibida em pontos percentuais.
        let difference = format_percentage(record.relative_difference).replace('%', " p.p.");
        html.push_str(&format!(
            r#"                                                <tr>
                                                    <td style="padding: 8px 6px; text-align: left; border-bottom: 1px solid #dee2e6; background-color: #ffffff;">{}</td>
                                                    <td style="padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6; color: {}; font-weight: 500; background-color: #ffffff;">{}</td>
                                                    <td style="padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6; background-color: #ffffff;">{}</td>
                                                    <td style="padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6; color: {}; font-weight: 500; background-color: #ffffff;">{}</td>
                                                </tr>
"#,
            record.period,
            value_color(record.portfolio_return),
            format_percentage(record.portfolio_return),
            format_percentage(record.benchmark_return),
            value_color(record.relative_difference),
            difference,
        ));
    }

    html.push_str(&format!(
        r#"                                                <tr>
                                                    <td style="padding: 8px 6px; text-align: left; border-bottom: 1px solid #dee2e6; font-weight: 500; background-color: #ffffff;">Retorno Financeiro:</td>
                                                    <td style="padding: 8px 6px; text-align: center; border-bottom: 1px solid #dee2e6; color: {}; font-weight: 500; background-color: #ffffff;" colspan="3">{}</td>
                                                </tr>
"#,
        value_color(financial_return),
        format_currency(financial_return),
    ));

    html.push_str(
        r#"                                            </tbody>
                                        </table>
"#,
    );
    html
}

/// Garante o "+" explícito no percentual de um ativo promotor.
///
/// "FUNDO A (7,83%)" vira "FUNDO A (+7,83%)"; entradas já sinalizadas ou sem
/// percentual analisável ficam como estão.
pub(crate) fn normalize_promoter_sign(asset: &str) -> String {
    let Some(raw) = percentage_capture(asset) else {
        return asset.to_string();
    };
    let positive = parse_parenthesized_percentage(asset).is_some_and(|p| p > 0.0);
    if positive && !raw.starts_with('+') {
        asset.replace(&format!("({}%)", raw), &format!("(+{}%)", raw))
    } else {
        asset.to_string()
    }
}

/// Seção em lista (estratégias, promotores ou detratores).
///
/// Listas vazias não produzem saída: a extração já garante conteúdo para as
/// seções obrigatórias, e uma lista vazia aqui significa que o chamador
/// optou por omitir a seção.
fn render_list_section(
    title: &str,
    css_class: &str,
    background: &str,
    color: &str,
    items: &[String],
    normalize_signs: bool,
) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    html.push_str(&format!(
        r#"                                        <h4 class="performance-header" style="font-size: 18px; color: #0D2035; margin: 20px 0 12px 0; font-weight: 500; border-bottom: 1px solid #e0e0e0; padding-bottom: 8px;">{}</h4>
                                        <ul class="{}" style="margin: 8px 0 15px 0; padding: 10px 10px 10px 30px; background-color: {}; border-radius: 5px; color: {};">
"#,
        title, css_class, background, color
    ));

    for item in items {
        let line = if normalize_signs {
            normalize_promoter_sign(item)
        } else {
            item.clone()
        };
        html.push_str(&format!(
            "                                            <li style=\"margin-bottom: 6px; font-size: 13px;\">{}</li>\n",
            line
        ));
    }

    html.push_str("                                        </ul>\n");
    html
}

/// Observações finais, com o comentário agregado das carteiras quando houver.
fn render_notes(additional_comment: &str) -> String {
    let mut html = String::new();
    html.push_str(
        r#"                            <table role="presentation" style="width: 100%; margin-top: 20px; border-collapse: collapse; background-color: #f8f9fa; border: 1px solid #e9ecef;">
                                <tr>
                                    <td style="padding: 15px;">
                                        <p style="margin: 0; color: #555555; font-size: 13px; line-height: 18px;">
                                            <strong style="font-weight: bold;">Obs.:</strong> Eventuais ajustes retroativos do IPCA, após a divulgação oficial do indicador, podem impactar marginalmente a rentabilidade do portfólio no mês anterior.
                                        </p>
"#,
    );

    if !additional_comment.is_empty() {
        html.push_str(&format!(
            r#"                                        <p style="margin: 12px 0 0 0; color: #555555; font-size: 13px; line-height: 18px;">
                                            <strong style="font-weight: bold;">Comentário:</strong> {}
                                        </p>
"#,
            additional_comment
        ));
    }

    html.push_str(
        r#"                                    </td>
                                </tr>
                            </table>
"#,
    );
    html
}

/// Bloco "Principais indicadores" com o texto vindo da configuração.
fn render_indicators(indicators: &str) -> String {
    format!(
        r#"                            <table role="presentation" style="width: 100%; margin-top: 15px; border-collapse: collapse; background-color: #f8f9fa; border: 1px solid #e9ecef;">
                                <tr>
                                    <td style="padding: 12px;">
                                        <p style="margin: 0 0 8px 0; font-weight: bold; color: #333333; font-size: 13px; line-height: 16px;">Principais indicadores:</p>
                                        <p style="margin: 0; color: #555555; font-size: 11px; line-height: 15px;">{}</p>
                                    </td>
                                </tr>
                            </table>
"#,
        indicators
    )
}

/// Botão com o link da carta mensal.
fn render_letter_button(month: &str, year: i32, base_url: &str) -> String {
    let link = format!(
        "{}/carta-mensal-{}-{}",
        base_url.trim_end_matches('/'),
        month.to_lowercase(),
        year
    );
    format!(
        r#"                            <table role="presentation" style="width: 100%; margin-top: 25px; border-collapse: collapse;">
                                <tr>
                                    <td align="center" style="padding: 0;">
                                        <table role="presentation" style="border-collapse: collapse; background-color: #0D2035; border-radius: 4px;">
                                            <tr>
                                                <td style="padding: 12px 24px; text-align: center;">
                                                    <a href="{}" target="_blank" style="color: #ffffff; text-decoration: none; font-weight: bold; font-size: 14px; line-height: 18px;">Confira nossa carta completa: Carta {} {}</a>
                                                </td>
                                            </tr>
                                        </table>
                                    </td>
                                </tr>
                            </table>
"#,
        link, month, year
    )
}

/// Rodapé institucional e fechamento do documento.
fn render_footer(year: i32) -> String {
    format!(
        r#"                        </td>
                    </tr>
                    <tr>
                        <td style="background-color: #f8f9fa; padding: 12px 20px; text-align: center;">
                            <p style="margin: 0 0 3px 0; color: #666666; font-size: 11px;">MMZR Family Office | Gestão de Patrimônio</p>
                            <p style="margin: 0 0 3px 0; color: #666666; font-size: 11px;">Este é um email automático. Por favor, não responda.</p>
                            <p style="margin: 0; color: #666666; font-size: 11px;">© {} MMZR Family Office. Todos os direitos reservados.</p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        year
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: &str, portfolio: f64, benchmark: f64, diff: f64) -> PerformanceRecord {
        PerformanceRecord {
            period: period.to_string(),
            portfolio_return: portfolio,
            benchmark_return: benchmark,
            relative_difference: diff,
        }
    }

    fn sample_portfolio() -> PortfolioData {
        PortfolioData {
            name: "Carteira Moderada".to_string(),
            kind: "Renda Variável + Renda Fixa".to_string(),
            comment: "Mês positivo para a carteira.".to_string(),
            performance: vec![
                record("Maio:", 2.38, 1.45, 0.93),
                record("No ano:", 8.76, 5.32, 3.44),
            ],
            financial_return: 15234.56,
            highlight_strategies: vec!["Renda fixa pós-fixada".to_string()],
            promoter_assets: vec!["FUNDO A (7,83%)".to_string()],
            detractor_assets: vec!["FUNDO B (-2,00%)".to_string()],
        }
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
    }

    #[test]
    fn test_email_subject() {
        assert_eq!(
            email_subject(reference()),
            "MMZR Family Office - Relatório Mensal de Performance - Maio de 2025"
        );
    }

    #[test]
    fn test_filter_canonical_periods_caps_at_two() {
        let records = vec![
            record("Maio:", 1.0, 0.5, 0.5),
            record("Abril:", 0.8, 0.4, 0.4),
            record("No ano:", 4.0, 3.0, 1.0),
            record("No ano:", 9.9, 9.9, 0.0),
        ];

        let filtered = filter_canonical_periods(&records);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].period, "Maio:");
        assert_eq!(filtered[1].portfolio_return, 4.0);
    }

    #[test]
    fn test_filter_canonical_periods_discovery_order() {
        // O ano pode vir antes do mês na planilha; a ordem de descoberta é
        // preservada.
        let records = vec![
            record("No ano:", 4.0, 3.0, 1.0),
            record("Maio:", 1.0, 0.5, 0.5),
        ];

        let filtered = filter_canonical_periods(&records);
        assert_eq!(filtered[0].period, "No ano:");
        assert_eq!(filtered[1].period, "Maio:");
    }

    #[test]
    fn test_filter_canonical_periods_ignores_unknown() {
        let records = vec![record("Desde o início:", 30.0, 20.0, 10.0)];
        assert!(filter_canonical_periods(&records).is_empty());
    }

    #[test]
    fn test_normalize_promoter_sign_adds_plus() {
        assert_eq!(
            normalize_promoter_sign("FUNDO A (7,83%)"),
            "FUNDO A (+7,83%)"
        );
    }

    #[test]
    fn test_normalize_promoter_sign_keeps_existing() {
        assert_eq!(
            normalize_promoter_sign("FUNDO A (+7,83%)"),
            "FUNDO A (+7,83%)"
        );
        assert_eq!(
            normalize_promoter_sign("FUNDO B (-2,00%)"),
            "FUNDO B (-2,00%)"
        );
        assert_eq!(normalize_promoter_sign("FUNDO C"), "FUNDO C");
    }

    #[test]
    fn test_render_email_contains_sections() {
        let html = render_email(
            "João Silva",
            reference(),
            &[sample_portfolio()],
            Some("Locais: CDI: +1,06%, Ibovespa: +3,69%"),
            "https://www.mmzrfo.com.br/post",
        );

        assert!(html.contains("Olá João Silva,"));
        assert!(html.contains("Relatório Mensal de Performance - Maio de 2025"));
        assert!(html.contains("Carteira Moderada"));
        assert!(html.contains("Estratégias de Destaque"));
        assert!(html.contains("Ativos Promotores"));
        assert!(html.contains("Ativos Detratores"));
        assert!(html.contains("R$ 15.234,56"));
        assert!(html.contains("Principais indicadores:"));
        assert!(html.contains("carta-mensal-maio-2025"));
        assert!(html.contains("Comentário:"));
        // O promotor extraído sem sinal aparece com "+" no e-mail.
        assert!(html.contains("FUNDO A (+7,83%)"));
    }

    #[test]
    fn test_render_email_without_indicators() {
        let html = render_email(
            "João Silva",
            reference(),
            &[sample_portfolio()],
            None,
            "https://www.mmzrfo.com.br/post",
        );
        assert!(!html.contains("Principais indicadores:"));
    }

    #[test]
    fn test_render_performance_table_difference_in_pp() {
        let html = render_performance_table(&[record("Maio:", 2.38, 1.45, 0.93)], 100.0);
        assert!(html.contains("+0.93 p.p."));
        assert!(html.contains("+2.38%"));
        assert!(html.contains("+1.45%"));
    }

    #[test]
    fn test_render_list_section_empty_renders_nothing() {
        let html = render_list_section(
            "Ativos Promotores",
            "promoters-section",
            "#e8f5e9",
            "#2e7d32",
            &[],
            true,
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_render_email_negative_values_colored() {
        let mut portfolio = sample_portfolio();
        portfolio.performance = vec![record("Maio:", -1.2, 0.3, -1.5)];
        portfolio.financial_return = -532.10;

        let html = render_email(
            "Cliente",
            reference(),
            &[portfolio],
            None,
            "https://www.mmzrfo.com.br/post",
        );
        assert!(html.contains("#dc3545"));
        assert!(html.contains("-R$ 532,10"));
        assert!(html.contains("-1.20%"));
    }
}
