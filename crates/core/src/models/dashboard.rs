use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analytics::{CategoryTotals, Totals};
use super::chart::{DonutChart, TrendPoint};
use super::transaction::TransactionKind;

/// A row in the "recent transactions" table, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    /// dd/mm/yyyy
    pub formatted_date: String,
    pub kind: TransactionKind,
    /// "+ R$ 6.200,00" for income, "- R$ 1.500,00" for expense
    pub signed_amount: String,
}

/// Everything the dashboard shows, recomputed from scratch on every change.
///
/// Plain data only. Renderers read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub totals: Totals,
    pub formatted_balance: String,
    pub formatted_income: String,
    pub formatted_expense: String,
    pub category_totals: CategoryTotals,
    /// Newest first
    pub recent: Vec<RecentTransaction>,
    pub chart: DonutChart,
    /// Oldest period first; the last point is the current period
    pub trend: Vec<TrendPoint>,
}
