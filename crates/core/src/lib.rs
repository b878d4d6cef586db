pub mod errors;
pub mod format;
pub mod logging;
pub mod models;
pub mod random;
pub mod services;
pub mod storage;

use chrono::{Local, NaiveDate};
use models::{
    dashboard::DashboardView,
    ledger::Ledger,
    settings::Settings,
    setup::SetupAmounts,
    transaction::{Transaction, TransactionDraft},
};
use random::{OsRandom, RandomSource};
use services::{dashboard_service::DashboardService, ledger_service::LedgerService};
use storage::{manager::StorageManager, traits::KeyValueStore};

use errors::CoreError;

pub use logging::init_tracing;

/// Main entry point for the FinanceFlow core library (the dashboard orchestrator).
///
/// Owns the ledger, its store and the current view model. Every mutation
/// runs the same pipeline before returning: recompute the view, then persist.
#[must_use]
pub struct FinanceTracker {
    ledger: Ledger,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    random: Box<dyn RandomSource>,
    ledger_service: LedgerService,
    dashboard_service: DashboardService,
    view: DashboardView,
    setup_done: bool,
    /// Pins "today" (period labels, default dates); `None` means the local clock.
    pinned_today: Option<NaiveDate>,
    /// Tracks whether the ledger changed since it was last persisted.
    dirty: bool,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("transactions", &self.ledger.len())
            .field("store", &self.store.name())
            .field("setup_done", &self.setup_done)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FinanceTracker {
    /// Open the tracker on `store` with stored (or default) settings and the
    /// OS random source.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let settings = StorageManager::load_settings(store.as_ref());
        Self::open_with(store, settings, Box::new(OsRandom::new()))
    }

    /// Open with explicit settings and random source.
    pub fn open_with(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self::build(store, settings, random, None)
    }

    /// Like [`open_with`](Self::open_with), with "today" fixed to `today`.
    pub fn open_on(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        random: Box<dyn RandomSource>,
        today: NaiveDate,
    ) -> Self {
        Self::build(store, settings, random, Some(today))
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Record a new transaction from form input. Returns its id.
    ///
    /// Invalid input (blank description, non-positive amount) leaves the
    /// ledger untouched and nothing is recomputed or saved.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<i64, CoreError> {
        let today = self.today();
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let id = self
            .ledger_service
            .append_draft(&mut self.ledger, draft, today, timestamp_ms)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected transaction"))?;

        tracing::info!(id, "Added transaction");
        self.dirty = true;
        self.refresh();
        Ok(id)
    }

    /// Append a fully-formed transaction (id included).
    pub fn append_transaction(&mut self, transaction: Transaction) -> Result<(), CoreError> {
        let id = transaction.id;
        self.ledger_service
            .append(&mut self.ledger, transaction)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected transaction"))?;

        tracing::info!(id, "Appended transaction");
        self.dirty = true;
        self.refresh();
        Ok(())
    }

    /// Replace the ledger wholesale. All-or-nothing.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), CoreError> {
        self.ledger_service.replace_all(&mut self.ledger, transactions)?;
        self.dirty = true;
        self.refresh();
        Ok(())
    }

    /// Finish first-run setup: seed the ledger from the recurring amounts
    /// (zero amounts skipped) and set the setup flag.
    /// Returns the number of seeded transactions.
    pub fn complete_setup(&mut self, amounts: SetupAmounts) -> Result<usize, CoreError> {
        let today = self.today();
        let count = self
            .ledger_service
            .seed_from_setup(&mut self.ledger, &amounts, today)?;

        self.setup_done = true;
        if let Err(e) = StorageManager::mark_setup_done(self.store.as_mut()) {
            tracing::error!(error = %e, "Failed to persist setup flag");
        }

        tracing::info!(seeded = count, "Completed first-run setup");
        self.dirty = true;
        self.refresh();
        Ok(count)
    }

    /// Change settings, persist them and recompute the view.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        StorageManager::save_settings(self.store.as_mut(), &settings)?;
        self.settings = settings;
        self.refresh();
        Ok(())
    }

    /// Recompute the whole view model, then persist the ledger.
    ///
    /// A failed save is logged and leaves [`has_unsaved_changes`](Self::has_unsaved_changes)
    /// set; the fresh view is available either way.
    pub fn refresh(&mut self) -> &DashboardView {
        let labels = self.period_labels();
        self.view = self.dashboard_service.build_view(
            &self.ledger,
            &self.settings,
            &labels,
            self.random.as_mut(),
        );

        if let Err(e) = self.save() {
            tracing::error!(store = self.store.name(), error = %e, "Failed to save ledger");
        }
        &self.view
    }

    /// Persist the ledger now. Clears the unsaved-changes flag on success.
    pub fn save(&mut self) -> Result<(), CoreError> {
        StorageManager::save_ledger(self.store.as_mut(), &self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// The view model computed by the last refresh.
    #[must_use]
    pub fn dashboard(&self) -> &DashboardView {
        &self.view
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All transactions in entry order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// The last `n` transactions entered, newest first.
    #[must_use]
    pub fn recent_transactions(&self, n: usize) -> Vec<&Transaction> {
        self.ledger.recent(n)
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    /// `true` until first-run setup has been completed on this store.
    #[must_use]
    pub fn needs_setup(&self) -> bool {
        !self.setup_done
    }

    /// Returns `true` if the ledger changed and has not been persisted since.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Trend period labels, oldest first, ending with the current month.
    #[must_use]
    pub fn period_labels(&self) -> Vec<String> {
        format::month_labels(self.today(), self.settings.trend_periods)
    }

    /// Export all transactions as a JSON array (same shape as the stored value).
    pub fn export_transactions_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions: {e}")))
    }

    /// Export the current view model as JSON (for web frontends).
    pub fn dashboard_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.view)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize dashboard: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn build(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        mut random: Box<dyn RandomSource>,
        pinned_today: Option<NaiveDate>,
    ) -> Self {
        let today = pinned_today.unwrap_or_else(|| Local::now().date_naive());
        let setup_done = StorageManager::is_setup_done(store.as_ref());
        let ledger = StorageManager::load_ledger(store.as_ref(), today);
        let dashboard_service = DashboardService::new();

        let labels = format::month_labels(today, settings.trend_periods);
        let view = dashboard_service.build_view(&ledger, &settings, &labels, random.as_mut());

        let mut tracker = Self {
            ledger,
            settings,
            store,
            random,
            ledger_service: LedgerService::new(),
            dashboard_service,
            view,
            setup_done,
            pinned_today,
            dirty: true,
        };

        // Startup persists too, so a fallback ledger is written back.
        if let Err(e) = tracker.save() {
            tracing::error!(store = tracker.store.name(), error = %e, "Failed to save ledger");
        }
        tracker
    }
}
