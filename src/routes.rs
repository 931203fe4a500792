// src/routes.rs
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, car_handler, driver_handler, manufacturer_handler},
    state::AppState,
};

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/manufacturers",
            get(manufacturer_handler::list_manufacturers).post(manufacturer_handler::create_manufacturer),
        )
        .route("/cars", get(car_handler::list_cars).post(car_handler::create_car))
        .route("/drivers", get(driver_handler::list_drivers).post(driver_handler::create_driver))
        .route("/drivers/:id", get(driver_handler::get_driver))
        .route("/drivers/:id/license", put(driver_handler::update_license_number))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
