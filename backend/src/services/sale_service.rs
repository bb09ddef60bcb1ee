use chrono::NaiveDate;
use tracing::error;

use crate::errors::{AppError, StoreError};
use crate::models::{CreateFuelSale, FuelSale, NewFuelSale, OpeningReading, SaleUpdate, UpdateFuelSale};
use crate::services::carry_forward_service;
use crate::services::sale_computation::{compute_edited_sale, compute_sale};
use crate::store::SaleStore;

pub async fn create(
    store: &dyn SaleStore,
    input: CreateFuelSale,
    default_rate: f64,
) -> Result<FuelSale, AppError> {
    let rate_per_liter = input.rate_per_liter.unwrap_or(default_rate);
    let figures = compute_sale(input.dispenser_open, input.dispenser_close, rate_per_liter)?;

    let new_sale = NewFuelSale {
        date: input.date,
        rate_per_liter,
        dispenser_open: input.dispenser_open.unwrap_or(0.0),
        dispenser_close: input.dispenser_close.unwrap_or(0.0),
        units_sold: figures.units_sold,
        total_sale: figures.total_sale,
    };

    let mut inserted = store.insert(std::slice::from_ref(&new_sale)).await.map_err(|e| {
        error!("Error adding sale: {}", e);
        e
    })?;
    inserted
        .pop()
        .ok_or_else(|| AppError::Store(StoreError::Unavailable("insert returned no rows".into())))
}

pub async fn update(
    store: &dyn SaleStore,
    id: i64,
    input: UpdateFuelSale,
) -> Result<FuelSale, AppError> {
    let figures = compute_edited_sale(input.dispenser_open, input.dispenser_close, input.rate_per_liter)?;

    let fields = SaleUpdate {
        rate_per_liter: input.rate_per_liter,
        dispenser_open: input.dispenser_open,
        dispenser_close: input.dispenser_close,
        units_sold: figures.units_sold,
        total_sale: figures.total_sale,
    };

    let sale = store.update_by_id(id, &fields).await.map_err(|e| {
        error!("Error updating sale {}: {}", id, e);
        e
    })?;
    Ok(sale)
}

pub async fn fetch_all(store: &dyn SaleStore) -> Result<Vec<FuelSale>, AppError> {
    let sales = store.select_all().await.map_err(|e| {
        error!("Error fetching sales: {}", e);
        e
    })?;
    Ok(sales)
}

pub async fn opening_reading(store: &dyn SaleStore, date: NaiveDate) -> OpeningReading {
    OpeningReading {
        date,
        dispenser_open: carry_forward_service::resolve_opening_reading(store, date).await,
    }
}
