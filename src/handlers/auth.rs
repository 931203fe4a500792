// src/handlers/auth.rs
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    errors::{FleetError, FleetResult},
    models::driver::{Driver, DriverLogin, LoginResponse},
    state::AppState,
};

/// The signed-in driver behind a `Bearer` session token.
///
/// Rejects the request with 401 before the handler body runs.
pub struct AuthenticatedDriver {
    pub driver: Driver,
    pub token: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedDriver {
    type Rejection = FleetError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| FleetError::unauthorized("Authentication required"))?;

        let driver = state.identity.resolve_session(token).await.ok_or_else(|| {
            tracing::debug!("Rejected unknown session token");
            FleetError::TokenInvalid
        })?;

        Ok(Self {
            driver,
            token: token.to_string(),
        })
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(login): Json<DriverLogin>,
) -> FleetResult<Json<LoginResponse>> {
    let driver = state
        .identity
        .authenticate(&login.username, &login.password)
        .await?
        .ok_or(FleetError::InvalidCredentials)?;

    let token = state.identity.create_session(&driver.id).await?;
    tracing::info!("Driver logged in: {}", driver.username);

    Ok(Json(LoginResponse { token, driver }))
}

pub async fn logout(State(state): State<Arc<AppState>>, auth: AuthenticatedDriver) -> StatusCode {
    state.identity.revoke_session(&auth.token).await;
    tracing::info!("Driver logged out: {}", auth.driver.username);
    StatusCode::NO_CONTENT
}
