use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{DashboardState, DashboardView, DateChange, EditInput, FormInput};
use crate::services::{carry_forward_service, dashboard_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/refresh", post(refresh))
        .route("/form", put(update_form))
        .route("/form/date", put(change_date))
        .route("/submit", post(submit))
        .route("/edit/:id", post(begin_edit))
        .route("/edit", put(update_edit))
        .route("/edit/save", post(save_edit))
        .route("/edit/cancel", post(cancel_edit))
        .route("/export", get(export))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// Runs a store-free transition while holding the dashboard lock.
async fn transition<F>(state: &AppState, f: F) -> DashboardState
where
    F: FnOnce(DashboardState) -> DashboardState,
{
    let mut guard = state.dashboard.lock().await;
    let next = f(std::mem::take(&mut *guard));
    *guard = next.clone();
    next
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    info!("GET /dashboard - Rendering dashboard state");
    Json(dashboard_service::view(state.dashboard_snapshot().await))
}

pub async fn refresh(State(state): State<AppState>) -> Json<DashboardView> {
    info!("POST /dashboard/refresh - Re-fetching sale records");
    let current = state.dashboard_snapshot().await;
    let next = dashboard_service::refresh(state.store.as_ref(), current).await;
    Json(dashboard_service::view(state.replace_dashboard(next).await))
}

pub async fn update_form(
    State(state): State<AppState>,
    Json(input): Json<FormInput>,
) -> Json<DashboardView> {
    info!("PUT /dashboard/form - Updating form values");
    let next = transition(&state, |s| dashboard_service::update_form(s, input)).await;
    Json(dashboard_service::view(next))
}

pub async fn change_date(
    State(state): State<AppState>,
    Json(change): Json<DateChange>,
) -> Json<DashboardView> {
    info!("PUT /dashboard/form/date - Changing form date to {}", change.date);
    // The lookup runs unlocked; its result lands on whatever the form holds when it arrives.
    let reading = carry_forward_service::resolve_opening_reading(state.store.as_ref(), change.date).await;
    let next = transition(&state, |s| {
        dashboard_service::apply_opening_reading(s, change.date, reading)
    })
    .await;
    Json(dashboard_service::view(next))
}

pub async fn submit(State(state): State<AppState>) -> Json<DashboardView> {
    info!("POST /dashboard/submit - Submitting sale record");
    let current = state.dashboard_snapshot().await;
    let next = dashboard_service::submit(state.store.as_ref(), current, today()).await;
    Json(dashboard_service::view(state.replace_dashboard(next).await))
}

pub async fn begin_edit(State(state): State<AppState>, Path(id): Path<i64>) -> Json<DashboardView> {
    info!("POST /dashboard/edit/{} - Entering edit mode", id);
    let next = transition(&state, |s| dashboard_service::begin_edit(s, id)).await;
    Json(dashboard_service::view(next))
}

pub async fn update_edit(
    State(state): State<AppState>,
    Json(input): Json<EditInput>,
) -> Json<DashboardView> {
    info!("PUT /dashboard/edit - Updating edit values");
    let next = transition(&state, |s| dashboard_service::update_edit(s, input)).await;
    Json(dashboard_service::view(next))
}

pub async fn save_edit(State(state): State<AppState>) -> Json<DashboardView> {
    info!("POST /dashboard/edit/save - Saving edited sale record");
    let current = state.dashboard_snapshot().await;
    let next = dashboard_service::save_edit(state.store.as_ref(), current).await;
    Json(dashboard_service::view(state.replace_dashboard(next).await))
}

pub async fn cancel_edit(State(state): State<AppState>) -> Json<DashboardView> {
    info!("POST /dashboard/edit/cancel - Leaving edit mode");
    let next = transition(&state, dashboard_service::cancel_edit).await;
    Json(dashboard_service::view(next))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    info!("GET /dashboard/export - Exporting sale records");
    let current = state.dashboard_snapshot().await;
    let file = dashboard_service::export(&current, today()).map_err(|e| {
        error!("Failed to export sale records: {}", e);
        e
    })?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];
    Ok((headers, file.bytes))
}
