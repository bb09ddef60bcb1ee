use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{dashboard, fuel_sales, health};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/fuel-sales", fuel_sales::router())
        .nest("/api/dashboard", dashboard::router())
        .layer(cors)
        .with_state(state)
}
