use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// Recurring monthly amounts collected by the first-run setup form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupAmounts {
    pub salary: f64,
    pub rent: f64,
    pub transport: f64,
    pub bills: f64,
}

impl SetupAmounts {
    pub fn new(salary: f64, rent: f64, transport: f64, bills: f64) -> Self {
        Self {
            salary,
            rent,
            transport,
            bills,
        }
    }

    /// Seed transactions for the ledger, one per positive amount.
    ///
    /// Ids are fixed per slot (salary 1, rent 2, transport 3, bills 4), so a
    /// skipped slot leaves a gap rather than shifting the others.
    pub fn to_transactions(&self, date: NaiveDate) -> Vec<Transaction> {
        let slots = [
            (1, "Salário", self.salary, TransactionKind::Income, "Salário"),
            (2, "Aluguel", self.rent, TransactionKind::Expense, "Moradia"),
            (3, "Transporte", self.transport, TransactionKind::Expense, "Transporte"),
            (4, "Contas", self.bills, TransactionKind::Expense, "Outros"),
        ];

        slots
            .into_iter()
            .filter(|(_, _, amount, _, _)| amount.is_finite() && *amount > 0.0)
            .map(|(id, description, amount, kind, category)| {
                Transaction::new(id, description, amount, kind, category, date)
            })
            .collect()
    }
}
