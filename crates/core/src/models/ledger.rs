use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// The main data container: every recorded transaction, in entry order.
///
/// Serialized as a bare JSON array under the `transactions` key.
/// Entry order is not date order: a transaction dated last week that was
/// typed in today sits at the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// The sample ledger shown before first-run setup, dated in `today`'s month.
    pub fn demo(today: NaiveDate) -> Self {
        let day = |d: u32| today.with_day(d).unwrap_or(today);
        Self::from_transactions(vec![
            Transaction::new(1, "Salário", 6200.0, TransactionKind::Income, "Salário", day(1)),
            Transaction::new(2, "Aluguel", 1500.0, TransactionKind::Expense, "Moradia", day(5)),
            Transaction::new(
                3,
                "Supermercado",
                650.50,
                TransactionKind::Expense,
                "Alimentação",
                day(10),
            ),
            Transaction::new(4, "Uber", 45.90, TransactionKind::Expense, "Transporte", day(12)),
        ])
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.transactions.iter().any(|t| t.id == id)
    }

    /// Largest id in the ledger, if any.
    pub fn max_id(&self) -> Option<i64> {
        self.transactions.iter().map(|t| t.id).max()
    }

    /// Pick an id for a new entry: the timestamp hint, bumped past every
    /// existing id so two appends in the same millisecond never collide.
    ///
    /// If the largest id is already `i64::MAX`, the smallest unused positive
    /// id is taken instead.
    pub fn next_id(&self, timestamp_hint: i64) -> i64 {
        match self.max_id() {
            Some(max) if max >= timestamp_hint => {
                max.checked_add(1).unwrap_or_else(|| self.smallest_unused_id())
            }
            _ => timestamp_hint,
        }
    }

    fn smallest_unused_id(&self) -> i64 {
        let mut ids: Vec<i64> = self.transactions.iter().map(|t| t.id).collect();
        ids.sort_unstable();

        // The ledger holds far fewer than i64::MAX entries, so this never overflows.
        let mut candidate = 1;
        for id in ids {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }

    /// The last `n` entries, most recently entered first.
    pub fn recent(&self, n: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(n).collect()
    }

    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub(crate) fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }
}
