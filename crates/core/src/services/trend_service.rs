use crate::models::analytics::Totals;
use crate::models::chart::TrendPoint;
use crate::random::RandomSource;

/// Lower bound of the synthetic scaling factor.
pub const SYNTHETIC_FACTOR_MIN: f64 = 0.3;

/// Width of the synthetic factor range: factors fall in `[0.3, 0.8)`.
pub const SYNTHETIC_FACTOR_SPREAD: f64 = 0.5;

/// Normalization floor, so an empty ledger never divides by zero.
pub const MIN_SCALE: f64 = 100.0;

/// Tallest bar, in percent of the chart container.
pub const MAX_BAR_HEIGHT_PCT: f64 = 80.0;

/// Builds the income/expense trend bars.
///
/// There is no per-month history: the current period shows the real totals,
/// and earlier periods are filler scaled from them by random factors.
pub struct TrendService;

impl TrendService {
    pub fn new() -> Self {
        Self
    }

    /// One point per label, oldest first. The last label is the current period.
    ///
    /// Every earlier period draws two independent factors from `random`
    /// (income first, then expense). Bar heights share one scale,
    /// `max(total_income, total_expense, 100)`, taken from the real totals.
    pub fn build_series(
        &self,
        totals: &Totals,
        period_labels: &[String],
        random: &mut dyn RandomSource,
    ) -> Vec<TrendPoint> {
        let scale = totals
            .total_income
            .max(totals.total_expense)
            .clamp(MIN_SCALE, f64::MAX);
        let last = period_labels.len().saturating_sub(1);

        period_labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let (income_value, expense_value) = if index == last {
                    (totals.total_income, totals.total_expense)
                } else {
                    (
                        totals.total_income * Self::synthetic_factor(random),
                        totals.total_expense * Self::synthetic_factor(random),
                    )
                };

                TrendPoint {
                    period_label: label.clone(),
                    income_value,
                    expense_value,
                    income_bar_height_pct: Self::bar_height(income_value, scale),
                    expense_bar_height_pct: Self::bar_height(expense_value, scale),
                }
            })
            .collect()
    }

    /// Factor in `[0.3, 0.8)`.
    fn synthetic_factor(random: &mut dyn RandomSource) -> f64 {
        SYNTHETIC_FACTOR_MIN + random.next_unit() * SYNTHETIC_FACTOR_SPREAD
    }

    /// Height in `[0, 80]`; a value that is not a finite number draws no bar.
    fn bar_height(value: f64, scale: f64) -> f64 {
        let height = (value / scale) * MAX_BAR_HEIGHT_PCT;
        if height.is_finite() {
            height.clamp(0.0, MAX_BAR_HEIGHT_PCT)
        } else {
            0.0
        }
    }
}

impl Default for TrendService {
    fn default() -> Self {
        Self::new()
    }
}
