// src/state.rs
use chrono::Duration;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::{
    errors::{FleetError, FleetResult},
    models::driver::NewDriver,
    query::DEFAULT_PAGE_SIZE,
    services::{
        car_service::CarService,
        driver_service::DriverService,
        identity_service::{IdentityProvider, InMemoryIdentity, DEFAULT_SESSION_TTL_SECS},
        manufacturer_service::ManufacturerService,
    },
};

pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub driver_service: Arc<DriverService>,
    pub manufacturer_service: Arc<ManufacturerService>,
    pub car_service: Arc<CarService>,
    pub config: AppConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub page_size: NonZeroUsize,
    pub bcrypt_cost: u32,
    pub session_ttl: Duration,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            admin_username: None,
            admin_password: None,
        }
    }
}

impl AppConfig {
    /// Read `TAXI_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> FleetResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> FleetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("TAXI_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(raw) = lookup("TAXI_PAGE_SIZE") {
            config.page_size = raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| FleetError::Configuration(format!("TAXI_PAGE_SIZE must be a positive integer, got '{}'", raw)))?;
        }

        if let Some(raw) = lookup("TAXI_BCRYPT_COST") {
            let cost = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| FleetError::Configuration(format!("TAXI_BCRYPT_COST must be an integer, got '{}'", raw)))?;
            if !(4..=31).contains(&cost) {
                return Err(FleetError::Configuration(format!(
                    "TAXI_BCRYPT_COST must be between 4 and 31, got {}",
                    cost
                )));
            }
            config.bcrypt_cost = cost;
        }

        if let Some(raw) = lookup("TAXI_SESSION_TTL_SECS") {
            let secs = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| FleetError::Configuration(format!("TAXI_SESSION_TTL_SECS must be a positive integer, got '{}'", raw)))?;
            config.session_ttl = Duration::seconds(i64::from(secs));
        }

        config.admin_username = lookup("TAXI_ADMIN_USERNAME").filter(|v| !v.is_empty());
        config.admin_password = lookup("TAXI_ADMIN_PASSWORD").filter(|v| !v.is_empty());
        if config.admin_username.is_some() != config.admin_password.is_some() {
            return Err(FleetError::Configuration(
                "TAXI_ADMIN_USERNAME and TAXI_ADMIN_PASSWORD must be set together".to_string(),
            ));
        }

        Ok(config)
    }
}

impl AppState {
    pub async fn new(config: AppConfig) -> FleetResult<Self> {
        let identity: Arc<dyn IdentityProvider> = Arc::new(InMemoryIdentity::new(config.bcrypt_cost).with_session_ttl(config.session_ttl));
        let driver_service = Arc::new(DriverService::new(identity.clone(), config.page_size));
        let manufacturer_service = Arc::new(ManufacturerService::new(config.page_size));
        let car_service = Arc::new(CarService::new(manufacturer_service.clone(), config.page_size));

        if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
            identity
                .create_user(NewDriver {
                    username: username.clone(),
                    password: password.clone(),
                    first_name: String::new(),
                    last_name: String::new(),
                    license_number: None,
                    is_admin: true,
                })
                .await?;
            tracing::info!("Seeded admin account: {}", username);
        } else {
            tracing::warn!("No admin account configured, the API is unreachable until one is seeded");
        }

        Ok(Self {
            identity,
            driver_service,
            manufacturer_service,
            car_service,
            config,
        })
    }
}
