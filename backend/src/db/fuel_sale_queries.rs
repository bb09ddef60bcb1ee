use chrono::NaiveDate;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::{FuelSale, NewFuelSale, SaleUpdate};

// NUMERIC columns are read back as FLOAT8 so rows map onto f64 fields.
// Writes go through TEXT: a FLOAT8 -> NUMERIC cast keeps only 15 digits.
const SELECT_COLUMNS: &str = "id, date,
    rate_per_liter::FLOAT8 AS rate_per_liter,
    dispenser_open::FLOAT8 AS dispenser_open,
    dispenser_close::FLOAT8 AS dispenser_close,
    units_sold::FLOAT8 AS units_sold,
    total_sale::FLOAT8 AS total_sale,
    created_at";

/// Shortest decimal form that parses back to the same `f64`.
pub fn numeric_text(value: f64) -> String {
    value.to_string()
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    input: &NewFuelSale,
) -> Result<FuelSale, sqlx::Error> {
    let sql = format!(
        "INSERT INTO fuel_sales (date, rate_per_liter, dispenser_open, dispenser_close, units_sold, total_sale)
         VALUES ($1, $2::TEXT::NUMERIC, $3::TEXT::NUMERIC, $4::TEXT::NUMERIC, $5::TEXT::NUMERIC, $6::TEXT::NUMERIC)
         RETURNING {}",
        SELECT_COLUMNS
    );
    sqlx::query_as::<_, FuelSale>(&sql)
        .bind(input.date)
        .bind(numeric_text(input.rate_per_liter))
        .bind(numeric_text(input.dispenser_open))
        .bind(numeric_text(input.dispenser_close))
        .bind(numeric_text(input.units_sold))
        .bind(numeric_text(input.total_sale))
        .fetch_one(executor)
        .await
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<FuelSale>, sqlx::Error> {
    let sql = format!(
        "SELECT {}
         FROM fuel_sales
         ORDER BY date DESC, created_at DESC, id DESC",
        SELECT_COLUMNS
    );
    sqlx::query_as::<_, FuelSale>(&sql).fetch_all(pool).await
}

pub async fn fetch_latest_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Option<FuelSale>, sqlx::Error> {
    let sql = format!(
        "SELECT {}
         FROM fuel_sales
         WHERE date = $1
         ORDER BY created_at DESC, id DESC
         LIMIT 1",
        SELECT_COLUMNS
    );
    sqlx::query_as::<_, FuelSale>(&sql)
        .bind(date)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    input: &SaleUpdate,
) -> Result<Option<FuelSale>, sqlx::Error> {
    let sql = format!(
        "UPDATE fuel_sales
         SET rate_per_liter = $1::TEXT::NUMERIC,
             dispenser_open = $2::TEXT::NUMERIC,
             dispenser_close = $3::TEXT::NUMERIC,
             units_sold = $4::TEXT::NUMERIC,
             total_sale = $5::TEXT::NUMERIC
         WHERE id = $6
         RETURNING {}",
        SELECT_COLUMNS
    );
    sqlx::query_as::<_, FuelSale>(&sql)
        .bind(numeric_text(input.rate_per_liter))
        .bind(numeric_text(input.dispenser_open))
        .bind(numeric_text(input.dispenser_close))
        .bind(numeric_text(input.units_sold))
        .bind(numeric_text(input.total_sale))
        .bind(id)
        .fetch_optional(pool)
        .await
}
