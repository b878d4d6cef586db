use crate::format::format_currency;
use crate::models::analytics::CategoryTotals;
use crate::models::chart::{ChartSector, DonutChart, LegendEntry};
use crate::models::settings::Settings;

/// Label of the single sector drawn when there is nothing to chart.
pub const PLACEHOLDER_LABEL: &str = "Sem dados";

/// Full circle, in degrees.
pub const FULL_CIRCLE: f64 = 360.0;

/// Builds the expense donut chart from per-category totals.
///
/// The core computes the geometry; the frontend only paints it.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Lay out one sector per category, proportional to its share of
    /// `total_expense`.
    ///
    /// Sectors are contiguous from 0°: each one starts where the previous one
    /// ended (running accumulator), in the categories' first-seen order.
    /// With no expenses (or a total that is not a finite number) the chart is a
    /// single neutral sector and an empty legend.
    pub fn build_donut(
        &self,
        category_totals: &CategoryTotals,
        total_expense: f64,
        settings: &Settings,
    ) -> DonutChart {
        let formatted_total = format_currency(total_expense, &settings.currency_symbol);

        if !total_expense.is_finite() || total_expense <= 0.0 || category_totals.is_empty() {
            return DonutChart {
                sectors: vec![ChartSector {
                    category: PLACEHOLDER_LABEL.to_string(),
                    color: settings.placeholder_color.clone(),
                    start_angle: 0.0,
                    end_angle: FULL_CIRCLE,
                }],
                legend: Vec::new(),
                total_expense: if total_expense.is_finite() {
                    total_expense.max(0.0)
                } else {
                    0.0
                },
                formatted_total,
            };
        }

        let mut sectors = Vec::with_capacity(category_totals.len());
        let mut legend = Vec::with_capacity(category_totals.len());
        let mut start_angle = 0.0;

        for entry in category_totals.iter() {
            let span = (entry.total / total_expense) * FULL_CIRCLE;
            let end_angle = start_angle + span;
            let color = settings.color_for(&entry.category).to_string();

            sectors.push(ChartSector {
                category: entry.category.clone(),
                color: color.clone(),
                start_angle,
                end_angle,
            });
            legend.push(LegendEntry {
                category: entry.category.clone(),
                color,
                value: entry.total,
                formatted_value: format_currency(entry.total, &settings.currency_symbol),
            });

            start_angle = end_angle;
        }

        DonutChart {
            sectors,
            legend,
            total_expense,
            formatted_total,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
