// src/handlers/car_handler.rs
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::FleetResult,
    handlers::auth::AuthenticatedDriver,
    models::car::{Car, CarCreate},
    query::SearchResult,
    services::car_service::CarOperations,
    state::AppState,
};

pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Query(params): Query<HashMap<String, String>>,
) -> FleetResult<Json<SearchResult<Car>>> {
    let result = state.car_service.list_cars(&params).await?;
    Ok(Json(result))
}

pub async fn create_car(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Json(request): Json<CarCreate>,
) -> FleetResult<(StatusCode, Json<Car>)> {
    let car = state.car_service.create_car(request).await?;
    Ok((StatusCode::CREATED, Json(car)))
}
