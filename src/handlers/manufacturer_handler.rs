// src/handlers/manufacturer_handler.rs
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
    models::manufacturer::{Manufacturer, ManufacturerCreate},
    query::SearchResult,
    services::manufacturer_service::ManufacturerOperations,
    state::AppState,
};

pub async fn list_manufacturers(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Query(params): Query<HashMap<String, String>>,
) -> FleetResult<Json<SearchResult<Manufacturer>>> {
    let result = state.manufacturer_service.list_manufacturers(&params).await?;
    Ok(Json(result))
}

pub async fn create_manufacturer(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Json(request): Json<ManufacturerCreate>,
) -> FleetResult<(StatusCode, Json<Manufacturer>)> {
    let manufacturer = state.manufacturer_service.create_manufacturer(request).await?;
    Ok((StatusCode::CREATED, Json(manufacturer)))
}
