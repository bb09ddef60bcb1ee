use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Price used for new entries when the operator has not typed one.
pub const DEFAULT_RATE_PER_LITER: f64 = 9500.0;

// One day of readings for a single dispenser, as stored in `fuel_sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FuelSale {
    pub id: i64,
    pub date: NaiveDate,
    pub rate_per_liter: f64,
    pub dispenser_open: f64,
    pub dispenser_close: f64,
    pub units_sold: f64,
    pub total_sale: f64,
    pub created_at: DateTime<Utc>,
}

/// A fully derived record that has not been handed to the store yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFuelSale {
    pub date: NaiveDate,
    pub rate_per_liter: f64,
    pub dispenser_open: f64,
    pub dispenser_close: f64,
    pub units_sold: f64,
    pub total_sale: f64,
}

/// Columns written by an update-by-id. `date`, `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub rate_per_liter: f64,
    pub dispenser_open: f64,
    pub dispenser_close: f64,
    pub units_sold: f64,
    pub total_sale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFuelSale {
    pub date: NaiveDate,
    pub rate_per_liter: Option<f64>,
    pub dispenser_open: Option<f64>,
    pub dispenser_close: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFuelSale {
    pub rate_per_liter: f64,
    pub dispenser_open: f64,
    pub dispenser_close: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningReadingQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningReading {
    pub date: NaiveDate,
    pub dispenser_open: f64,
}

impl FuelSale {
    pub fn editable_values(&self) -> UpdateFuelSale {
        UpdateFuelSale {
            rate_per_liter: self.rate_per_liter,
            dispenser_open: self.dispenser_open,
            dispenser_close: self.dispenser_close,
        }
    }
}
