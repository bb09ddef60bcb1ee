use serde::{Deserialize, Serialize};

// Figures behind the three dashboard tiles. Display strings are pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_liters_sold: f64,
    pub average_sale: Option<f64>,
    pub total_sales_display: String,
    pub total_liters_display: String,
    pub average_sale_display: Option<String>,
}
