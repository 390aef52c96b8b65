//! Módulo Formatter
//!
//! Funções puras de formatação no padrão brasileiro: moeda, percentual e
//! nomes de mês em português.

use chrono::NaiveDate;

/// Nomes dos meses em português, indexados por `mês - 1`.
pub(crate) const MONTH_NAMES_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Nome do mês em português (1 a 12).
///
/// # Panics
///
/// Entra em pânico para valores fora de 1..=12. Os chamadores sempre passam
/// `Datelike::month()`, que respeita esse intervalo.
pub fn month_name_pt(month: u32) -> &'static str {
    MONTH_NAMES_PT[(month - 1) as usize]
}

/// Formata um valor em reais no padrão brasileiro.
///
/// Milhares agrupados com ponto, centavos com vírgula e o sinal negativo
/// antes do símbolo da moeda: `-R$ 1.234,50`. Zero nunca recebe sinal.
///
/// # Exemplos
///
/// ```rust
/// use mmzr_report::format_currency;
///
/// assert_eq!(format_currency(1234.5), "R$ 1.234,50");
/// assert_eq!(format_currency(-1234.5), "-R$ 1.234,50");
/// assert_eq!(format_currency(0.0), "R$ 0,00");
/// ```
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let negative = value < 0.0 && cents > 0;
    let integer = cents / 100;
    let fraction = cents % 100;

    let grouped = group_thousands(integer);
    if negative {
        format!("-R$ {},{:02}", grouped, fraction)
    } else {
        format!("R$ {},{:02}", grouped, fraction)
    }
}

/// Formata um percentual com duas casas decimais.
///
/// Valores estritamente positivos recebem o prefixo "+"; zero e negativos
/// não recebem prefixo: `+2.38%`, `0.00%`, `-1.42%`.
pub fn format_percentage(value: f64) -> String {
    // Normaliza -0.0 para não exibir "-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Formata a data de referência do relatório como dd/mm/aaaa.
pub fn format_reference_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Agrupa os milhares de um inteiro com pontos.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
