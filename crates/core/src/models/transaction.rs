use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionKind::Income),
            "expense" | "despesa" => Ok(TransactionKind::Expense),
            other => Err(CoreError::ValidationError(format!(
                "Unknown transaction kind '{other}' (expected income or expense)"
            ))),
        }
    }
}

/// A single recorded income or expense.
///
/// **Important**: `amount` is always positive. The sign shown to the user
/// is derived from `kind`, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique within the ledger (timestamp-derived, or 1..4 for setup seeds)
    pub id: i64,

    /// Free-text label shown in the recent transactions table
    #[serde(alias = "desc")]
    pub description: String,

    /// Amount in the display currency (always positive)
    pub amount: f64,

    /// Income or expense
    #[serde(alias = "type")]
    pub kind: TransactionKind,

    /// Category label used by the donut chart
    pub category: String,

    /// Calendar date of the transaction (daily granularity)
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        id: i64,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by `kind` (expenses negative).
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Unvalidated transaction input, as typed into the "new transaction" form.
///
/// Becomes a [`Transaction`] only once the ledger accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Build a draft from raw form text. Fails if the amount does not parse
    /// to a positive finite number.
    pub fn from_form(
        description: &str,
        amount: &str,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Self, CoreError> {
        let amount = Self::parse_amount(amount).ok_or_else(|| {
            CoreError::ValidationError(format!(
                "Amount '{amount}' is not a positive number"
            ))
        })?;
        Ok(Self::new(description, amount, kind, category))
    }

    /// Parse a user-entered amount. Accepts `.` or `,` as decimal separator.
    ///
    /// When both appear, whichever comes last is the decimal separator and the
    /// other one groups thousands: `1.234,56` and `1,234.56` both parse as
    /// 1234.56. Returns `None` for anything that is not a positive finite number.
    pub fn parse_amount(text: &str) -> Option<f64> {
        let trimmed = text.trim();
        let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
            (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => trimmed.replace(',', ""),
            (Some(_), None) => trimmed.replace(',', "."),
            _ => trimmed.to_string(),
        };
        normalized
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Check the invariants a transaction must satisfy before entering the ledger.
    ///
    /// Rules:
    /// - Description must not be blank
    /// - Amount must be positive and finite
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Description must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    pub(crate) fn into_transaction(self, id: i64, today: NaiveDate) -> Transaction {
        Transaction {
            id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.trim().to_string(),
            date: self.date.unwrap_or(today),
        }
    }
}
