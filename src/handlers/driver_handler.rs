// src/handlers/driver_handler.rs
use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{FleetError, FleetResult},
    handlers::auth::AuthenticatedDriver,
    models::driver::{Driver, DriverRegistration, LicenseNumberUpdate},
    query::SearchResult,
    services::driver_service::DriverOperations,
    state::AppState,
};

pub async fn list_drivers(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Query(params): Query<HashMap<String, String>>,
) -> FleetResult<Json<SearchResult<Driver>>> {
    let result = state.driver_service.list_drivers(&params).await?;
    Ok(Json(result))
}

/// On success redirects to the new driver's detail resource.
pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Json(registration): Json<DriverRegistration>,
) -> FleetResult<Response> {
    let driver = state.driver_service.register_driver(registration).await?;
    let location = format!("/drivers/{}", driver.id);

    Ok((StatusCode::SEE_OTHER, [(LOCATION, location)], Json(driver)).into_response())
}

pub async fn get_driver(
    State(state): State<Arc<AppState>>,
    _auth: AuthenticatedDriver,
    Path(driver_id): Path<String>,
) -> FleetResult<Json<Driver>> {
    let driver = state.driver_service.get_driver(&driver_id).await?;
    Ok(Json(driver))
}

/// Admins may change any license number, drivers only their own.
pub async fn update_license_number(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedDriver,
    Path(driver_id): Path<String>,
    Json(update): Json<LicenseNumberUpdate>,
) -> FleetResult<Json<Driver>> {
    if !auth.driver.is_admin && auth.driver.id != driver_id {
        return Err(FleetError::Forbidden(
            "Only administrators can change another driver's license number".to_string(),
        ));
    }

    let driver = state.driver_service.update_license_number(&driver_id, update).await?;
    Ok(Json(driver))
}
