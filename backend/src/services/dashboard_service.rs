//! Dashboard state machine.
//!
//! Every transition takes the current [`DashboardState`] by value and returns
//! the next one. Transitions that need the store are `async` and never hold
//! on to the state across calls, so callers decide how concurrent results are
//! merged.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{
    CreateFuelSale, DashboardState, DashboardView, EditInput, EditPreview, EditState, FormInput,
    FuelSale, SaleForm,
};
use crate::services::export_service::{self, ExportFile};
use crate::services::sale_computation;
use crate::services::{carry_forward_service, sale_service, summary_service};
use crate::store::SaleStore;

pub const FETCH_FAILED: &str = "Failed to fetch sales data";
pub const ADD_FAILED: &str = "Failed to add sale record";
pub const UPDATE_FAILED: &str = "Failed to update sale record";

/// Initial load: fetch every record and carry forward the opening reading
/// for the form's date.
pub async fn load(store: &dyn SaleStore, state: DashboardState) -> DashboardState {
    let date = state.form.date;
    let state = refresh(store, state).await;
    let reading = carry_forward_service::resolve_opening_reading(store, date).await;
    apply_opening_reading(state, date, reading)
}

/// Replace the record list with a full re-fetch. On failure the previous
/// list is kept and the error is set.
pub async fn refresh(store: &dyn SaleStore, state: DashboardState) -> DashboardState {
    let fetched = sale_service::fetch_all(store).await;
    apply_records(state, fetched)
}

/// Apply the outcome of a full re-fetch to the record list.
pub fn apply_records(mut state: DashboardState, fetched: Result<Vec<FuelSale>, AppError>) -> DashboardState {
    match fetched {
        Ok(records) => state.records = records,
        Err(_) => state.error = Some(FETCH_FAILED.to_string()),
    }
    state.loading = false;
    state
}

/// Look up the carry-forward reading for `date` and apply it.
pub async fn change_date(store: &dyn SaleStore, state: DashboardState, date: NaiveDate) -> DashboardState {
    let reading = carry_forward_service::resolve_opening_reading(store, date).await;
    apply_opening_reading(state, date, reading)
}

/// Apply a resolved carry-forward reading to the form.
///
/// Results are applied in arrival order: a lookup that resolves late
/// overwrites whatever date a newer lookup already set.
pub fn apply_opening_reading(mut state: DashboardState, date: NaiveDate, reading: f64) -> DashboardState {
    state.form.date = date;
    state.form.dispenser_open = Some(reading);
    state
}

pub fn update_form(mut state: DashboardState, input: FormInput) -> DashboardState {
    state.form.rate_per_liter = input.rate_per_liter;
    state.form.dispenser_open = input.dispenser_open;
    state.form.dispenser_close = input.dispenser_close;
    state
}

/// Validate the form, insert it, re-fetch and reset the form.
pub async fn submit(store: &dyn SaleStore, mut state: DashboardState, today: NaiveDate) -> DashboardState {
    let form = state.form.clone();
    if let Err(e) = sale_computation::compute_sale(form.dispenser_open, form.dispenser_close, form.rate_per_liter) {
        state.error = Some(e.to_string());
        return state;
    }

    let input = CreateFuelSale {
        date: form.date,
        rate_per_liter: Some(form.rate_per_liter),
        dispenser_open: form.dispenser_open,
        dispenser_close: form.dispenser_close,
    };
    match sale_service::create(store, input, state.default_rate).await {
        Ok(sale) => {
            info!("Added sale record {} for {}", sale.id, sale.date);
            let mut state = refresh(store, state).await;
            state.form = SaleForm::blank(today, state.default_rate);
            state.error = None;
            state
        }
        Err(AppError::Validation(e)) => {
            state.error = Some(e.to_string());
            state
        }
        Err(_) => {
            state.error = Some(ADD_FAILED.to_string());
            state
        }
    }
}

/// Record `id` if it can enter edit mode from the current state.
pub fn editable_record(state: &DashboardState, id: i64) -> Result<&FuelSale, AppError> {
    if let Some(current) = state.edit.editing_id() {
        if current != id {
            return Err(AppError::Conflict(format!(
                "Finish editing sale record {} before editing another",
                current
            )));
        }
    }
    state
        .records
        .iter()
        .find(|sale| sale.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Sale record {} not found", id)))
}

/// Snapshot rate and readings of record `id`. Only one record can be edited
/// at a time; a second record is rejected and the first edit is kept.
pub fn begin_edit(mut state: DashboardState, id: i64) -> DashboardState {
    match editable_record(&state, id) {
        Ok(sale) => {
            let values = sale.editable_values();
            state.edit = EditState::Editing { id, values };
        }
        Err(e) => {
            warn!("Rejected edit of sale record {}: {}", id, e);
            state.error = Some(error_message(e));
        }
    }
    state
}

pub fn update_edit(mut state: DashboardState, input: EditInput) -> DashboardState {
    if let EditState::Editing { values, .. } = &mut state.edit {
        if let Some(rate) = input.rate_per_liter {
            values.rate_per_liter = rate;
        }
        if let Some(open) = input.dispenser_open {
            values.dispenser_open = open;
        }
        if let Some(close) = input.dispenser_close {
            values.dispenser_close = close;
        }
    }
    state
}

/// Validate the snapshot, write it, re-fetch and leave edit mode.
pub async fn save_edit(store: &dyn SaleStore, mut state: DashboardState) -> DashboardState {
    let EditState::Editing { id, values } = state.edit.clone() else {
        return state;
    };

    match sale_service::update(store, id, values).await {
        Ok(sale) => {
            info!("Updated sale record {}", sale.id);
            let mut state = refresh(store, state).await;
            state.edit = EditState::Idle;
            state.error = None;
            state
        }
        Err(AppError::Validation(e)) => {
            state.error = Some(e.to_string());
            state
        }
        Err(_) => {
            state.error = Some(UPDATE_FAILED.to_string());
            state
        }
    }
}

pub fn cancel_edit(mut state: DashboardState) -> DashboardState {
    state.edit = EditState::Idle;
    state
}

pub fn export(state: &DashboardState, today: NaiveDate) -> Result<ExportFile, AppError> {
    export_service::export_sales(&state.records, today)
}

pub fn view(state: DashboardState) -> DashboardView {
    let summary = summary_service::summarize(&state.records);
    let edit_preview = match &state.edit {
        EditState::Idle => None,
        EditState::Editing { id, values } => {
            let figures =
                sale_computation::preview(values.dispenser_open, values.dispenser_close, values.rate_per_liter);
            Some(EditPreview {
                id: *id,
                units_sold: figures.units_sold,
                total_sale: figures.total_sale,
            })
        }
    };
    DashboardView {
        state,
        summary,
        edit_preview,
    }
}

fn error_message(err: AppError) -> String {
    match err {
        AppError::Conflict(msg) | AppError::NotFound(msg) => msg,
        other => other.to_string(),
    }
}
