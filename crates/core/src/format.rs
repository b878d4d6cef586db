//! Brazilian Portuguese display formatting for money, dates and month labels.

use chrono::{Datelike, NaiveDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Format money the pt-BR way: `R$ 1.234,56`, `-R$ 10,00`.
///
/// Non-finite values format as zero.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}{symbol} {},{cents:02}", group_thousands(whole))
}

/// Format a transaction amount with the sign implied by its kind:
/// `+ R$ 6.200,00` or `- R$ 1.500,00`.
pub fn format_signed(amount: f64, is_income: bool, symbol: &str) -> String {
    let sign = if is_income { '+' } else { '-' };
    format!("{sign} {}", format_currency(amount.abs(), symbol))
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Three-letter pt-BR abbreviation for a month number (1..=12).
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[((month.clamp(1, 12)) - 1) as usize]
}

/// Labels for the `count` months ending with `today`'s month, oldest first.
///
/// `month_labels(2026-10-16, 6)` → `["Mai", "Jun", "Jul", "Ago", "Set", "Out"]`.
pub fn month_labels(today: NaiveDate, count: usize) -> Vec<String> {
    let current = today.month0() as i64;
    (0..count as i64)
        .rev()
        .map(|back| {
            let month0 = (current - back).rem_euclid(12) as u32;
            month_abbreviation(month0 + 1).to_string()
        })
        .collect()
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(".")
}
