// src/services/identity_service.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing;

use crate::{
    models::driver::{Driver, NewDriver},
    utils::id_generator::{IdGenerator, IdType},
    utils::license_number::LicenseNumber,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("A driver with username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Driver not found: {0}")]
    UnknownDriver(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Account storage, credential checks and sessions.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Hash the password and persist the driver. Usernames are unique.
    async fn create_user(&self, new_driver: NewDriver) -> Result<Driver, IdentityError>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Driver>, IdentityError>;
    async fn username_exists(&self, username: &str) -> bool;
    async fn get_driver(&self, driver_id: &str) -> Option<Driver>;
    async fn list_drivers(&self) -> Vec<Driver>;
    async fn set_license_number(&self, driver_id: &str, license_number: LicenseNumber) -> Result<Driver, IdentityError>;
    async fn create_session(&self, driver_id: &str) -> Result<String, IdentityError>;
    async fn resolve_session(&self, token: &str) -> Option<Driver>;
    async fn revoke_session(&self, token: &str) -> bool;
}

/// Sessions last a day unless configured otherwise.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

struct Session {
    driver_id: String,
    issued_at: DateTime<Utc>,
}

pub struct InMemoryIdentity {
    drivers: RwLock<Vec<Driver>>,
    sessions: RwLock<HashMap<String, Session>>,
    bcrypt_cost: u32,
    session_ttl: Duration,
}

impl InMemoryIdentity {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            drivers: RwLock::new(Vec::new()),
            sessions: RwLock::new(HashMap::new()),
            bcrypt_cost,
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
        }
    }

    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        session.issued_at + self.session_ttl <= now
    }

    async fn hash_password(&self, password: &str) -> Result<String, IdentityError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| IdentityError::Hashing(format!("Task join error: {}", e)))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, IdentityError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| IdentityError::Hashing(format!("Task join error: {}", e)))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn create_user(&self, new_driver: NewDriver) -> Result<Driver, IdentityError> {
        let password_hash = self.hash_password(&new_driver.password).await?;

        // Uniqueness check and insert happen under one write lock.
        let mut drivers = self.drivers.write().await;
        if drivers.iter().any(|d| d.username == new_driver.username) {
            tracing::warn!("Rejected duplicate username: {}", new_driver.username);
            return Err(IdentityError::DuplicateUsername(new_driver.username));
        }

        let driver = Driver {
            id: IdGenerator::generate_unique(IdType::Driver, |id| drivers.iter().any(|d| d.id == id)),
            username: new_driver.username,
            password_hash,
            first_name: new_driver.first_name,
            last_name: new_driver.last_name,
            license_number: new_driver.license_number,
            is_admin: new_driver.is_admin,
            date_joined: Utc::now(),
        };
        drivers.push(driver.clone());

        tracing::info!("Created account {} ({})", driver.username, driver.id);
        Ok(driver)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Driver>, IdentityError> {
        let candidate = self
            .drivers
            .read()
            .await
            .iter()
            .find(|d| d.username == username)
            .cloned();

        let Some(driver) = candidate else {
            tracing::debug!("Login for unknown username: {}", username);
            return Ok(None);
        };

        if self.verify_password(password, &driver.password_hash).await? {
            Ok(Some(driver))
        } else {
            tracing::debug!("Wrong password for: {}", username);
            Ok(None)
        }
    }

    async fn username_exists(&self, username: &str) -> bool {
        self.drivers.read().await.iter().any(|d| d.username == username)
    }

    async fn get_driver(&self, driver_id: &str) -> Option<Driver> {
        self.drivers.read().await.iter().find(|d| d.id == driver_id).cloned()
    }

    async fn list_drivers(&self) -> Vec<Driver> {
        self.drivers.read().await.clone()
    }

    async fn set_license_number(&self, driver_id: &str, license_number: LicenseNumber) -> Result<Driver, IdentityError> {
        let mut drivers = self.drivers.write().await;
        let driver = drivers
            .iter_mut()
            .find(|d| d.id == driver_id)
            .ok_or_else(|| IdentityError::UnknownDriver(driver_id.to_string()))?;

        driver.license_number = Some(license_number);
        Ok(driver.clone())
    }

    async fn create_session(&self, driver_id: &str) -> Result<String, IdentityError> {
        if self.get_driver(driver_id).await.is_none() {
            return Err(IdentityError::UnknownDriver(driver_id.to_string()));
        }

        let now = Utc::now();
        let token = uuid::Uuid::new_v4().simple().to_string();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        if sessions.len() < before {
            tracing::debug!("Pruned {} expired sessions", before - sessions.len());
        }

        sessions.insert(
            token.clone(),
            Session {
                driver_id: driver_id.to_string(),
                issued_at: now,
            },
        );
        Ok(token)
    }

    async fn resolve_session(&self, token: &str) -> Option<Driver> {
        let driver_id = {
            let mut sessions = self.sessions.write().await;
            let session = sessions.get(token)?;
            if self.is_expired(session, Utc::now()) {
                tracing::debug!("Session expired for driver {}", session.driver_id);
                sessions.remove(token);
                return None;
            }
            session.driver_id.clone()
        };
        self.get_driver(&driver_id).await
    }

    async fn revoke_session(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
