use chrono::NaiveDate;
use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::setup::SetupAmounts;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Validates and applies ledger mutations (append, replace-all).
///
/// Pure business logic, no I/O. A rejected mutation leaves the ledger
/// exactly as it was.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft, assign it an id and append it.
    ///
    /// The id is `timestamp_ms`, bumped past the current maximum id if needed.
    /// A draft without a date is dated `today`. Returns the new id.
    pub fn append_draft(
        &self,
        ledger: &mut Ledger,
        draft: TransactionDraft,
        today: NaiveDate,
        timestamp_ms: i64,
    ) -> Result<i64, CoreError> {
        draft.validate()?;
        let id = ledger.next_id(timestamp_ms);
        let transaction = draft.into_transaction(id, today);
        self.append(ledger, transaction)?;
        Ok(id)
    }

    /// Append an already-built transaction after checking it.
    pub fn append(&self, ledger: &mut Ledger, transaction: Transaction) -> Result<(), CoreError> {
        self.validate_transaction(&transaction)?;
        if ledger.contains_id(transaction.id) {
            return Err(CoreError::ValidationError(format!(
                "Transaction id {} already exists",
                transaction.id
            )));
        }
        Self::check_running_totals(ledger.transactions().iter().chain([&transaction]))?;
        ledger.push(transaction);
        Ok(())
    }

    /// Replace the whole ledger. All transactions are validated first;
    /// if any fails, nothing changes (all-or-nothing).
    pub fn replace_all(
        &self,
        ledger: &mut Ledger,
        transactions: Vec<Transaction>,
    ) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for transaction in &transactions {
            self.validate_transaction(transaction)?;
            if !seen.insert(transaction.id) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate transaction id {}",
                    transaction.id
                )));
            }
        }
        Self::check_running_totals(transactions.iter())?;
        ledger.replace_all(transactions);
        Ok(())
    }

    /// Replace the ledger with the first-run setup entries (positive amounts only).
    /// Returns how many entries were seeded.
    pub fn seed_from_setup(
        &self,
        ledger: &mut Ledger,
        amounts: &SetupAmounts,
        date: NaiveDate,
    ) -> Result<usize, CoreError> {
        let transactions = amounts.to_transactions(date);
        let count = transactions.len();
        self.replace_all(ledger, transactions)?;
        Ok(count)
    }

    /// Rules:
    /// - Description must not be blank
    /// - Amount must be positive and finite
    fn validate_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.description.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Description must not be empty".into(),
            ));
        }
        if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {}",
                transaction.amount
            )));
        }
        Ok(())
    }

    /// Income and expense sums must stay finite.
    fn check_running_totals<'a>(
        transactions: impl Iterator<Item = &'a Transaction>,
    ) -> Result<(), CoreError> {
        let (mut income, mut expense) = (0.0_f64, 0.0_f64);
        for transaction in transactions {
            let total = if transaction.is_income() {
                &mut income
            } else {
                &mut expense
            };
            *total += transaction.amount;
            if !total.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Adding {} would overflow the {} total",
                    transaction.amount, transaction.kind
                )));
            }
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
