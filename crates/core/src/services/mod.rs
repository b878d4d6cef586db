pub mod aggregation_service;
pub mod chart_service;
pub mod dashboard_service;
pub mod ledger_service;
pub mod trend_service;
