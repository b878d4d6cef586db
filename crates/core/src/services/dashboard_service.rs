use crate::format::{format_currency, format_date, format_signed};
use crate::models::dashboard::{DashboardView, RecentTransaction};
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;
use crate::random::RandomSource;
use crate::services::aggregation_service::AggregationService;
use crate::services::chart_service::ChartService;
use crate::services::trend_service::TrendService;

/// Derives the complete dashboard view model from a ledger snapshot.
///
/// Fixed order: totals → category totals → donut chart → trend series →
/// recent list. No side effects; persisting is the tracker's job.
pub struct DashboardService {
    aggregation_service: AggregationService,
    chart_service: ChartService,
    trend_service: TrendService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
            chart_service: ChartService::new(),
            trend_service: TrendService::new(),
        }
    }

    pub fn build_view(
        &self,
        ledger: &Ledger,
        settings: &Settings,
        period_labels: &[String],
        random: &mut dyn RandomSource,
    ) -> DashboardView {
        let symbol = &settings.currency_symbol;

        let totals = self.aggregation_service.aggregate(ledger);
        let category_totals = self
            .aggregation_service
            .category_totals(ledger, &settings.income_category);

        // The donut total is the sum of charted categories, so sector spans
        // always close the circle even when income-labelled expenses exist.
        let charted_expense = category_totals.sum();
        let chart = self
            .chart_service
            .build_donut(&category_totals, charted_expense, settings);

        let trend = self
            .trend_service
            .build_series(&totals, period_labels, random);

        let recent = ledger
            .recent(settings.recent_limit)
            .into_iter()
            .map(|tx| RecentTransaction {
                id: tx.id,
                description: tx.description.clone(),
                category: tx.category.clone(),
                date: tx.date,
                formatted_date: format_date(tx.date),
                kind: tx.kind,
                signed_amount: format_signed(tx.amount, tx.is_income(), symbol),
            })
            .collect();

        tracing::debug!(
            transactions = ledger.len(),
            categories = category_totals.len(),
            periods = trend.len(),
            "Recomputed dashboard"
        );

        DashboardView {
            formatted_balance: format_currency(totals.net_balance, symbol),
            formatted_income: format_currency(totals.total_income, symbol),
            formatted_expense: format_currency(totals.total_expense, symbol),
            totals,
            category_totals,
            recent,
            chart,
            trend,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
