use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;

use super::traits::KeyValueStore;

/// Key holding the JSON array of transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Key holding the JSON boolean set once first-run setup completes.
pub const SETUP_DONE_KEY: &str = "setup-done";

/// Key holding optional user settings.
pub const SETTINGS_KEY: &str = "settings";

/// High-level storage operations: ledger, setup flag and settings to/from a
/// [`KeyValueStore`].
///
/// Loading never fails: missing or corrupt values fall back to defaults and
/// are logged. Saving returns the store's error to the caller.
pub struct StorageManager;

impl StorageManager {
    /// Load the persisted ledger.
    ///
    /// Fallback when the `transactions` value is absent or unreadable:
    /// - setup already done → empty ledger
    /// - setup pending → the demo ledger dated in `today`'s month
    pub fn load_ledger(store: &dyn KeyValueStore, today: NaiveDate) -> Ledger {
        let fallback = || {
            if Self::is_setup_done(store) {
                Ledger::new()
            } else {
                Ledger::demo(today)
            }
        };

        let raw = match store.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(
                    store = store.name(),
                    "No stored transactions, using fallback ledger"
                );
                return fallback();
            }
            Err(e) => {
                tracing::warn!(
                    store = store.name(),
                    error = %e,
                    "Failed to read transactions, using fallback ledger"
                );
                return fallback();
            }
        };

        match Self::ledger_from_json(&raw) {
            Ok(ledger) => {
                tracing::info!(store = store.name(), count = ledger.len(), "Loaded ledger");
                ledger
            }
            Err(e) => {
                tracing::warn!(
                    store = store.name(),
                    error = %e,
                    "Stored transactions are corrupt, using fallback ledger"
                );
                fallback()
            }
        }
    }

    /// Overwrite the stored ledger with `ledger`.
    pub fn save_ledger(store: &mut dyn KeyValueStore, ledger: &Ledger) -> Result<(), CoreError> {
        let json = serde_json::to_string(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        store.set(TRANSACTIONS_KEY, &json)
    }

    /// Parse a ledger from its stored JSON form.
    ///
    /// Rejects data that breaks ledger invariants (non-positive amounts,
    /// duplicate ids) the same as malformed JSON.
    pub fn ledger_from_json(json: &str) -> Result<Ledger, CoreError> {
        let ledger: Ledger = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;

        let mut seen = std::collections::HashSet::new();
        for tx in ledger.transactions() {
            if !tx.amount.is_finite() || tx.amount <= 0.0 {
                return Err(CoreError::Deserialization(format!(
                    "Transaction {} has non-positive amount {}",
                    tx.id, tx.amount
                )));
            }
            if !seen.insert(tx.id) {
                return Err(CoreError::Deserialization(format!(
                    "Duplicate transaction id {}",
                    tx.id
                )));
            }
        }

        Ok(ledger)
    }

    /// Whether first-run setup has completed. Unreadable flags count as "no".
    pub fn is_setup_done(store: &dyn KeyValueStore) -> bool {
        match store.get(SETUP_DONE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(raw.trim()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unreadable setup flag");
                false
            }),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read setup flag");
                false
            }
        }
    }

    pub fn mark_setup_done(store: &mut dyn KeyValueStore) -> Result<(), CoreError> {
        store.set(SETUP_DONE_KEY, "true")
    }

    /// Load settings, or defaults when none are stored or they are corrupt.
    pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
        match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored settings are corrupt, using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save_settings(
        store: &mut dyn KeyValueStore,
        settings: &Settings,
    ) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))?;
        store.set(SETTINGS_KEY, &json)
    }
}
