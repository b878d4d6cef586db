use comfy_table::{presets::UTF8_FULL, Cell, Table};

use financeflow_core::format::{format_date, format_signed};
use financeflow_core::models::dashboard::DashboardView;
use financeflow_core::models::settings::Settings;
use financeflow_core::models::transaction::Transaction;

/// Width in characters of a bar at 100% height.
const BAR_WIDTH: f64 = 40.0;

fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

fn bar(height_pct: f64) -> String {
    let len = ((height_pct / 100.0) * BAR_WIDTH).round().max(0.0) as usize;
    "█".repeat(len)
}

pub fn dashboard(view: &DashboardView) {
    println!("Saldo:    {}", view.formatted_balance);
    println!("Receitas: {}", view.formatted_income);
    println!("Despesas: {}", view.formatted_expense);
    println!();

    println!("Transações recentes");
    let rows = view
        .recent
        .iter()
        .map(|t| {
            vec![
                t.description.clone(),
                t.category.clone(),
                t.formatted_date.clone(),
                t.signed_amount.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Descrição", "Categoria", "Data", "Valor"], rows));
    println!();

    println!("Despesas por categoria ({})", view.chart.formatted_total);
    if view.chart.is_placeholder() {
        println!("  (sem despesas)");
    } else {
        let rows = view
            .chart
            .legend
            .iter()
            .zip(&view.chart.sectors)
            .map(|(entry, sector)| {
                vec![
                    entry.category.clone(),
                    entry.color.clone(),
                    format!("{:.1}°", sector.span()),
                    entry.formatted_value.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Categoria", "Cor", "Fatia", "Valor"], rows));
    }
    println!();

    println!("Tendência");
    for point in &view.trend {
        println!("  {:<4} + {}", point.period_label, bar(point.income_bar_height_pct));
        println!("  {:<4} - {}", "", bar(point.expense_bar_height_pct));
    }
}

pub fn transactions(transactions: &[Transaction], settings: &Settings) {
    let rows = transactions
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.description.clone(),
                t.category.clone(),
                format_date(t.date),
                format_signed(t.amount, t.is_income(), &settings.currency_symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Descrição", "Categoria", "Data", "Valor"], rows)
    );
}
