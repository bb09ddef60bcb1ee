//! End-to-end dashboard flows against the in-memory store.

use chrono::NaiveDate;

use fuel_center::models::{DashboardState, EditInput, EditState, FormInput};
use fuel_center::services::dashboard_service;
use fuel_center::services::export_service;
use fuel_center::store::{MemorySaleStore, SaleStore};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn fill(state: DashboardState, rate: f64, open: Option<f64>, close: Option<f64>) -> DashboardState {
    dashboard_service::update_form(
        state,
        FormInput {
            rate_per_liter: rate,
            dispenser_open: open,
            dispenser_close: close,
        },
    )
}

#[tokio::test]
async fn test_scenario_insert_then_carry_forward() {
    let store = MemorySaleStore::new();
    let state = dashboard_service::load(&store, DashboardState::new(date("2024-01-02"), 9500.0)).await;
    assert_eq!(state.form.dispenser_open, Some(0.0));

    let state = fill(state, 9500.0, Some(100.0), Some(150.0));
    let state = dashboard_service::submit(&store, state, date("2024-01-02")).await;

    assert!(state.error.is_none());
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].units_sold, 50.0);
    assert_eq!(state.records[0].total_sale, 475_000.0);

    let state = dashboard_service::change_date(&store, state, date("2024-01-03")).await;
    assert_eq!(state.form.date, date("2024-01-03"));
    assert_eq!(state.form.dispenser_open, Some(150.0));
}

#[tokio::test]
async fn test_scenario_inverted_readings_rejected() {
    let store = MemorySaleStore::new();
    let state = dashboard_service::load(&store, DashboardState::new(date("2024-01-02"), 9500.0)).await;

    let state = fill(state, 9500.0, Some(200.0), Some(100.0));
    let state = dashboard_service::submit(&store, state, date("2024-01-02")).await;

    assert_eq!(
        state.error.as_deref(),
        Some("Dispenser Close must be greater than Dispenser Open")
    );
    assert!(state.records.is_empty());
    assert!(store.select_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_twice_is_idempotent() {
    let store = MemorySaleStore::new();
    let mut state = DashboardState::new(date("2024-01-01"), 9500.0);
    for (day, open, close) in [
        ("2024-01-03", 150.0, 190.0),
        ("2024-01-01", 0.0, 100.0),
        ("2024-01-02", 100.0, 150.0),
        ("2024-01-02", 150.0, 151.0),
    ] {
        state.form.date = date(day);
        state = fill(state, 9500.0, Some(open), Some(close));
        state = dashboard_service::submit(&store, state, date("2024-01-04")).await;
    }

    let first = dashboard_service::refresh(&store, state).await;
    let second = dashboard_service::refresh(&store, first.clone()).await;
    assert_eq!(first.records, second.records);
    assert!(first.records.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

#[tokio::test]
async fn test_edit_round_trip_recomputes_figures() {
    let store = MemorySaleStore::new();
    let state = DashboardState::new(date("2024-01-02"), 9500.0);
    let state = fill(state, 9500.0, Some(100.0), Some(150.0));
    let state = dashboard_service::submit(&store, state, date("2024-01-02")).await;
    let original = state.records[0].clone();

    let state = dashboard_service::begin_edit(state, original.id);
    let state = dashboard_service::update_edit(
        state,
        EditInput {
            rate_per_liter: Some(9800.0),
            dispenser_open: Some(105.0),
            dispenser_close: Some(175.5),
        },
    );
    let state = dashboard_service::save_edit(&store, state).await;

    assert_eq!(state.edit, EditState::Idle);
    assert!(state.error.is_none());

    let state = dashboard_service::refresh(&store, state).await;
    let edited = &state.records[0];
    assert_eq!(edited.id, original.id);
    assert_eq!(edited.date, original.date);
    assert_eq!(edited.units_sold, 175.5 - 105.0);
    assert_eq!(edited.total_sale, (175.5 - 105.0) * 9800.0);
}

#[tokio::test]
async fn test_failed_update_keeps_edit_and_sets_error() {
    let store = MemorySaleStore::new();
    let state = fill(DashboardState::new(date("2024-01-02"), 9500.0), 9500.0, Some(1.0), Some(2.0));
    let state = dashboard_service::submit(&store, state, date("2024-01-02")).await;
    let state = dashboard_service::begin_edit(state, state_id(&store).await);

    store.set_unavailable(Some("maintenance"));
    let state = dashboard_service::save_edit(&store, state).await;

    assert_eq!(state.error.as_deref(), Some(dashboard_service::UPDATE_FAILED));
    assert!(matches!(state.edit, EditState::Editing { .. }));
    assert_eq!(state.records.len(), 1);
}

async fn state_id(store: &MemorySaleStore) -> i64 {
    store.select_all().await.unwrap()[0].id
}

#[tokio::test]
async fn test_stale_carry_forward_overwrites_newer_date() {
    let store = MemorySaleStore::new();
    let mut state = DashboardState::new(date("2024-01-01"), 9500.0);
    for (day, open, close) in [("2024-01-01", 0.0, 100.0), ("2024-01-04", 300.0, 420.0)] {
        state.form.date = date(day);
        state = fill(state, 9500.0, Some(open), Some(close));
        state = dashboard_service::submit(&store, state, date("2024-01-05")).await;
    }

    // Operator picks 2024-01-02, then 2024-01-05; the first lookup answers last.
    let first = fuel_center::services::carry_forward_service::resolve_opening_reading(&store, date("2024-01-02")).await;
    let second = fuel_center::services::carry_forward_service::resolve_opening_reading(&store, date("2024-01-05")).await;

    let state = dashboard_service::apply_opening_reading(state, date("2024-01-05"), second);
    let state = dashboard_service::apply_opening_reading(state, date("2024-01-02"), first);

    assert_eq!(state.form.date, date("2024-01-02"));
    assert_eq!(state.form.dispenser_open, Some(100.0));
}

#[tokio::test]
async fn test_export_from_dashboard_is_chronological() {
    let store = MemorySaleStore::new();
    let mut state = DashboardState::new(date("2024-01-01"), 9500.0);
    for (day, open, close) in [("2024-01-03", 20.0, 30.0), ("2024-01-01", 0.0, 10.0), ("2024-01-02", 10.0, 20.0)] {
        state.form.date = date(day);
        state = fill(state, 9500.0, Some(open), Some(close));
        state = dashboard_service::submit(&store, state, date("2024-01-04")).await;
    }

    let file = dashboard_service::export(&state, date("2024-01-04")).unwrap();
    assert_eq!(file.file_name, "fuel-sales-2024-01-04.csv");

    let body = String::from_utf8(file.bytes).unwrap();
    let dates: Vec<&str> = body
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(body.lines().next().unwrap(), export_service::EXPORT_HEADER.join(","));
}
