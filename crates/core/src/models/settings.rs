use serde::{Deserialize, Serialize};

/// A category label and the chart color used for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryColor {
    pub category: String,
    pub color: String,
}

impl CategoryColor {
    pub fn new(category: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            color: color.into(),
        }
    }
}

/// User-configurable settings, optionally stored under the `settings` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix used when formatting money (e.g., "R$").
    pub currency_symbol: String,

    /// Category label reserved for income; never counted in the donut chart.
    pub income_category: String,

    /// Donut chart palette, looked up by exact category label.
    pub category_colors: Vec<CategoryColor>,

    /// Color for categories missing from `category_colors`.
    pub default_color: String,

    /// Color of the single "no data" sector shown when there are no expenses.
    pub placeholder_color: String,

    /// How many transactions the recent list shows.
    pub recent_limit: usize,

    /// Number of periods (months) in the trend series, current one included.
    pub trend_periods: usize,
}

impl Settings {
    /// Chart color for a category, falling back to `default_color`.
    pub fn color_for(&self, category: &str) -> &str {
        self.category_colors
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.color.as_str())
            .unwrap_or(&self.default_color)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            income_category: "Salário".to_string(),
            category_colors: vec![
                CategoryColor::new("Moradia", "#05CD99"),
                CategoryColor::new("Alimentação", "#4318FF"),
                CategoryColor::new("Transporte", "#FFB547"),
                CategoryColor::new("Lazer", "#EE5D50"),
                CategoryColor::new("Salário", "#2B3674"),
                CategoryColor::new("Outros", "#A3AED0"),
            ],
            default_color: "#ccc".to_string(),
            placeholder_color: "#1B254B".to_string(),
            recent_limit: 5,
            trend_periods: 6,
        }
    }
}
