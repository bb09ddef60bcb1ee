//! Persistence seam for sale records.
//!
//! The dashboard and the record API only talk to [`SaleStore`]; the backing
//! implementation is picked at startup from `STORE_BACKEND`.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::StoreError;
use crate::models::{FuelSale, NewFuelSale, SaleUpdate};

pub use memory::MemorySaleStore;
pub use postgres::PgSaleStore;

#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Insert fully derived records and return them as stored.
    async fn insert(&self, sales: &[NewFuelSale]) -> Result<Vec<FuelSale>, StoreError>;

    /// All records, newest date first. Same-date records are ordered by
    /// `created_at` descending, then `id` descending.
    async fn select_all(&self) -> Result<Vec<FuelSale>, StoreError>;

    /// Most recently created record for `date`, if any.
    async fn select_latest_by_date(&self, date: NaiveDate) -> Result<Option<FuelSale>, StoreError>;

    /// Overwrite the editable and derived columns of record `id`.
    async fn update_by_id(&self, id: i64, fields: &SaleUpdate) -> Result<FuelSale, StoreError>;
}
