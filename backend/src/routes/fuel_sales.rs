use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CreateFuelSale, FuelSale, OpeningReading, OpeningReadingQuery, Summary, UpdateFuelSale};
use crate::services::{dashboard_service, sale_service, summary_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_sales).post(create_sale))
        .route("/opening-reading", get(get_opening_reading))
        .route("/summary", get(get_summary))
        .route("/:id", put(update_sale))
}

// Writes made here must show up in the dashboard's record list.
async fn refresh_dashboard(state: &AppState) {
    let fetched = sale_service::fetch_all(state.store.as_ref()).await;
    let mut dashboard = state.dashboard.lock().await;
    let next = dashboard_service::apply_records(std::mem::take(&mut *dashboard), fetched);
    *dashboard = next;
}

pub async fn fetch_sales(State(state): State<AppState>) -> Result<Json<Vec<FuelSale>>, AppError> {
    info!("GET /fuel-sales - Fetching all sale records");
    let sales = sale_service::fetch_all(state.store.as_ref()).await?;
    Ok(Json(sales))
}

pub async fn create_sale(
    State(state): State<AppState>,
    Json(data): Json<CreateFuelSale>,
) -> Result<(StatusCode, Json<FuelSale>), AppError> {
    info!("POST /fuel-sales - Creating sale record for {}", data.date);
    let sale = sale_service::create(state.store.as_ref(), data, state.default_rate)
        .await
        .map_err(|e| {
            error!("Failed to create sale record: {}", e);
            e
        })?;
    refresh_dashboard(&state).await;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateFuelSale>,
) -> Result<Json<FuelSale>, AppError> {
    info!("PUT /fuel-sales/{} - Updating sale record", id);
    let sale = sale_service::update(state.store.as_ref(), id, data)
        .await
        .map_err(|e| {
            error!("Failed to update sale record {}: {}", id, e);
            e
        })?;
    refresh_dashboard(&state).await;
    Ok(Json(sale))
}

pub async fn get_opening_reading(
    State(state): State<AppState>,
    Query(query): Query<OpeningReadingQuery>,
) -> Json<OpeningReading> {
    info!("GET /fuel-sales/opening-reading - Resolving opening reading for {}", query.date);
    Json(sale_service::opening_reading(state.store.as_ref(), query.date).await)
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    info!("GET /fuel-sales/summary - Summarizing sale records");
    let sales = sale_service::fetch_all(state.store.as_ref()).await?;
    Ok(Json(summary_service::summarize(&sales)))
}
