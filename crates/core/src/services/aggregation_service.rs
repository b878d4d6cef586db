use crate::models::analytics::{CategoryTotals, Totals};
use crate::models::ledger::Ledger;
use crate::models::transaction::TransactionKind;

/// Computes ledger totals and per-category expense sums.
///
/// Stateless; every call derives fresh numbers from the ledger snapshot.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Total income, total expense and net balance.
    ///
    /// Sums saturate at `f64::MAX`, so every field stays finite.
    pub fn aggregate(&self, ledger: &Ledger) -> Totals {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;

        for tx in ledger.transactions() {
            match tx.kind {
                TransactionKind::Income => total_income += tx.amount,
                TransactionKind::Expense => total_expense += tx.amount,
            }
        }

        let total_income = saturate(total_income);
        let total_expense = saturate(total_expense);

        Totals {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
        }
    }

    /// Expense totals per category in first-seen order.
    ///
    /// Anything filed under `income_category` is skipped even when marked as
    /// an expense, so salary never shows up as a donut slice.
    pub fn category_totals(&self, ledger: &Ledger, income_category: &str) -> CategoryTotals {
        let mut totals = CategoryTotals::new();
        for tx in ledger
            .transactions()
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.category != income_category)
        {
            totals.add(&tx.category, tx.amount);
        }
        totals
    }
}

fn saturate(sum: f64) -> f64 {
    if sum.is_nan() {
        0.0
    } else {
        sum.min(f64::MAX)
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
