pub mod analytics;
pub mod chart;
pub mod dashboard;
pub mod ledger;
pub mod settings;
pub mod setup;
pub mod transaction;
