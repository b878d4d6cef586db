use serde::{Deserialize, Serialize};

/// One slice of the expense donut chart. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSector {
    pub category: String,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ChartSector {
    /// Angular width of the sector.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// A legend row next to the donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
    pub value: f64,
    /// `value` formatted in the display currency (e.g., "R$ 1.500,00")
    pub formatted_value: String,
}

/// Donut chart of expenses by category.
///
/// Angles are in degrees, clockwise from the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutChart {
    /// Contiguous sectors starting at 0°, in legend order
    pub sectors: Vec<ChartSector>,

    /// One entry per real sector; empty when there is no expense data
    pub legend: Vec<LegendEntry>,

    /// Total expense shown in the middle of the donut
    pub total_expense: f64,

    pub formatted_total: String,
}

impl DonutChart {
    /// True when the chart only holds the "no data" sector.
    pub fn is_placeholder(&self) -> bool {
        self.legend.is_empty()
    }

    /// CSS `conic-gradient(...)` for web frontends.
    pub fn to_conic_gradient(&self) -> String {
        if self.is_placeholder() {
            let color = self
                .sectors
                .first()
                .map(|s| s.color.as_str())
                .unwrap_or("#1B254B");
            return format!("conic-gradient({color} 0% 100%)");
        }
        let stops: Vec<String> = self
            .sectors
            .iter()
            .map(|s| format!("{} {}deg {}deg", s.color, s.start_angle, s.end_angle))
            .collect();
        format!("conic-gradient({})", stops.join(", "))
    }
}

/// One period (month) in the income/expense trend bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Period label, e.g. "Out"
    pub period_label: String,

    pub income_value: f64,

    pub expense_value: f64,

    /// Bar height as a percentage of the chart container (0..=80)
    pub income_bar_height_pct: f64,

    pub expense_bar_height_pct: f64,
}
