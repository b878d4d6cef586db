use crate::errors::CoreError;

/// Durable string key-value storage the ledger is persisted to.
///
/// Mirrors a browser's `localStorage`: whole values are read and overwritten,
/// never merged. The last writer wins.
pub trait KeyValueStore {
    /// Human-readable name of this backend (for logs).
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}
