// src/models/driver.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{EntityKind, Searchable};
use crate::utils::license_number::LicenseNumber;

/// A driver is also the account that signs in to the fleet service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Driver {
    pub id: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<LicenseNumber>, // None only for directly provisioned accounts
    pub is_admin: bool,
    pub date_joined: DateTime<Utc>,
}

impl Searchable for Driver {
    const KIND: EntityKind = EntityKind::Driver;

    fn search_value(&self) -> &str {
        &self.username
    }
}

/// Registration form as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverRegistration {
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "password1")]
    pub password: String,
    #[serde(default, alias = "password2")]
    pub password_confirmation: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub license_number: String,
}

/// Fields handed to the identity provider once the registration form is valid.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<LicenseNumber>,
    pub is_admin: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LicenseNumberUpdate {
    pub license_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DriverLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub driver: Driver,
}
