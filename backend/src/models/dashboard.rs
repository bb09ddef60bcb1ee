use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fuel_sale::{FuelSale, UpdateFuelSale, DEFAULT_RATE_PER_LITER};
use super::summary::Summary;

/// Values of the "add new sale" form. Blank readings are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleForm {
    pub date: NaiveDate,
    pub rate_per_liter: f64,
    pub dispenser_open: Option<f64>,
    pub dispenser_close: Option<f64>,
}

impl SaleForm {
    pub fn blank(today: NaiveDate, rate_per_liter: f64) -> Self {
        Self {
            date: today,
            rate_per_liter,
            dispenser_open: None,
            dispenser_close: None,
        }
    }
}

/// Rate and readings as currently typed in the form. The date is changed separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInput {
    pub rate_per_liter: f64,
    pub dispenser_open: Option<f64>,
    pub dispenser_close: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditInput {
    pub rate_per_liter: Option<f64>,
    pub dispenser_open: Option<f64>,
    pub dispenser_close: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateChange {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditState {
    Idle,
    Editing { id: i64, values: UpdateFuelSale },
}

impl EditState {
    pub fn editing_id(&self) -> Option<i64> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub records: Vec<FuelSale>,
    pub loading: bool,
    pub form: SaleForm,
    pub edit: EditState,
    pub error: Option<String>,
    pub default_rate: f64,
}

impl DashboardState {
    pub fn new(today: NaiveDate, default_rate: f64) -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            form: SaleForm::blank(today, default_rate),
            edit: EditState::Idle,
            error: None,
            default_rate,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(chrono::Utc::now().date_naive(), DEFAULT_RATE_PER_LITER)
    }
}

/// Live figures for the row being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPreview {
    pub id: i64,
    pub units_sold: f64,
    pub total_sale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub state: DashboardState,
    pub summary: Summary,
    pub edit_preview: Option<EditPreview>,
}
