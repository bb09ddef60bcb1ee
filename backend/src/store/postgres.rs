use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::fuel_sale_queries;
use crate::errors::StoreError;
use crate::models::{FuelSale, NewFuelSale, SaleUpdate};

use super::SaleStore;

#[derive(Clone)]
pub struct PgSaleStore {
    pool: PgPool,
}

impl PgSaleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleStore for PgSaleStore {
    async fn insert(&self, sales: &[NewFuelSale]) -> Result<Vec<FuelSale>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(sales.len());
        for sale in sales {
            inserted.push(fuel_sale_queries::insert(&mut *tx, sale).await?);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn select_all(&self) -> Result<Vec<FuelSale>, StoreError> {
        Ok(fuel_sale_queries::fetch_all(&self.pool).await?)
    }

    async fn select_latest_by_date(&self, date: NaiveDate) -> Result<Option<FuelSale>, StoreError> {
        Ok(fuel_sale_queries::fetch_latest_by_date(&self.pool, date).await?)
    }

    async fn update_by_id(&self, id: i64, fields: &SaleUpdate) -> Result<FuelSale, StoreError> {
        fuel_sale_queries::update(&self.pool, id, fields)
            .await?
            .ok_or(StoreError::NotFound(id))
    }
}
