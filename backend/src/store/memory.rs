use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::Mutex;

use crate::errors::StoreError;
use crate::models::{FuelSale, NewFuelSale, SaleUpdate};

use super::SaleStore;

#[derive(Default)]
struct Inner {
    rows: Vec<FuelSale>,
    next_id: i64,
    last_created_at: Option<DateTime<Utc>>,
    writes: u64,
    unavailable: Option<String>,
}

/// In-process store with the same ordering rules as the `fuel_sales` table.
#[derive(Clone, Default)]
pub struct MemorySaleStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `StoreError::Unavailable` until cleared.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        self.inner.lock().unavailable = reason.map(str::to_string);
    }

    /// Number of successful inserts and updates so far.
    pub fn write_count(&self) -> u64 {
        self.inner.lock().writes
    }

    fn check_available(inner: &Inner) -> Result<(), StoreError> {
        match &inner.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    // Creation timestamps strictly increase so same-date ordering is stable.
    fn next_created_at(inner: &mut Inner) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match inner.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_created_at = Some(created_at);
        created_at
    }
}

#[async_trait]
impl SaleStore for MemorySaleStore {
    async fn insert(&self, sales: &[NewFuelSale]) -> Result<Vec<FuelSale>, StoreError> {
        let mut inner = self.inner.lock();
        Self::check_available(&inner)?;

        let mut inserted = Vec::with_capacity(sales.len());
        for sale in sales {
            inner.next_id += 1;
            let record = FuelSale {
                id: inner.next_id,
                date: sale.date,
                rate_per_liter: sale.rate_per_liter,
                dispenser_open: sale.dispenser_open,
                dispenser_close: sale.dispenser_close,
                units_sold: sale.units_sold,
                total_sale: sale.total_sale,
                created_at: Self::next_created_at(&mut inner),
            };
            inner.rows.push(record.clone());
            inserted.push(record);
        }
        inner.writes += 1;
        Ok(inserted)
    }

    async fn select_all(&self) -> Result<Vec<FuelSale>, StoreError> {
        let inner = self.inner.lock();
        Self::check_available(&inner)?;

        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn select_latest_by_date(&self, date: NaiveDate) -> Result<Option<FuelSale>, StoreError> {
        let inner = self.inner.lock();
        Self::check_available(&inner)?;

        Ok(inner
            .rows
            .iter()
            .filter(|row| row.date == date)
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn update_by_id(&self, id: i64, fields: &SaleUpdate) -> Result<FuelSale, StoreError> {
        let mut inner = self.inner.lock();
        Self::check_available(&inner)?;

        let row = inner
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound(id))?;
        row.rate_per_liter = fields.rate_per_liter;
        row.dispenser_open = fields.dispenser_open;
        row.dispenser_close = fields.dispenser_close;
        row.units_sold = fields.units_sold;
        row.total_sale = fields.total_sale;
        let updated = row.clone();
        inner.writes += 1;
        Ok(updated)
    }
}
