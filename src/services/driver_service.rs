// src/services/driver_service.rs
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, OnceLock};
use tracing;

use crate::{
    errors::{FleetError as AppError, ValidationCode, ValidationError},
    models::driver::{Driver, DriverRegistration, LicenseNumberUpdate, NewDriver},
    query::{build_predicate, list_page, BaseOrdering, EntityKind, PageNumber, SearchResult},
    services::identity_service::{IdentityError, IdentityProvider},
    utils::id_generator::{IdGenerator, IdType},
    utils::license_number::LicenseNumber,
};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt only hashes the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

static USERNAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn username_pattern() -> &'static Regex {
    USERNAME_PATTERN.get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"))
}

#[async_trait]
pub trait DriverOperations: Send + Sync {
    async fn register_driver(&self, registration: DriverRegistration) -> Result<Driver, AppError>;
    async fn get_driver(&self, driver_id: &str) -> Result<Driver, AppError>;
    async fn list_drivers(&self, params: &HashMap<String, String>) -> Result<SearchResult<Driver>, AppError>;
    async fn update_license_number(&self, driver_id: &str, update: LicenseNumberUpdate) -> Result<Driver, AppError>;
}

pub struct DriverService {
    identity: Arc<dyn IdentityProvider>,
    page_size: NonZeroUsize,
}

impl DriverService {
    pub fn new(identity: Arc<dyn IdentityProvider>, page_size: NonZeroUsize) -> Self {
        Self { identity, page_size }
    }

    /// Field checks that need no storage access. Every failing field is reported.
    pub fn validate_registration(registration: &DriverRegistration) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let username = &registration.username;
        if username.is_empty() {
            errors.push(ValidationError::new("username", ValidationCode::Required, "This field is required."));
        } else if username.chars().count() > USERNAME_MAX_LENGTH || !username_pattern().is_match(username) {
            errors.push(ValidationError::new(
                "username",
                ValidationCode::InvalidUsername,
                format!(
                    "Enter a valid username of at most {} characters: letters, digits and @/./+/-/_ only.",
                    USERNAME_MAX_LENGTH
                ),
            ));
        }

        let password = &registration.password;
        if password.is_empty() {
            errors.push(ValidationError::new("password", ValidationCode::Required, "This field is required."));
        } else {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                errors.push(ValidationError::new(
                    "password",
                    ValidationCode::PasswordTooShort,
                    format!("This password is too short. It must contain at least {} characters.", MIN_PASSWORD_LENGTH),
                ));
            }
            if password.len() > MAX_PASSWORD_BYTES {
                errors.push(ValidationError::new(
                    "password",
                    ValidationCode::PasswordTooLong,
                    format!("This password is too long. It must be at most {} bytes.", MAX_PASSWORD_BYTES),
                ));
            }
            if password.chars().all(|c| c.is_ascii_digit()) {
                errors.push(ValidationError::new(
                    "password",
                    ValidationCode::PasswordEntirelyNumeric,
                    "This password is entirely numeric.",
                ));
            }
        }

        let confirmation = &registration.password_confirmation;
        if confirmation.is_empty() {
            errors.push(ValidationError::new(
                "password_confirmation",
                ValidationCode::Required,
                "This field is required.",
            ));
        } else if !password.is_empty() && password != confirmation {
            errors.push(ValidationError::new(
                "password_confirmation",
                ValidationCode::PasswordMismatch,
                "The two password fields didn't match.",
            ));
        }

        if registration.license_number.is_empty() {
            errors.push(ValidationError::new("license_number", ValidationCode::Required, "This field is required."));
        } else if let Err(err) = LicenseNumber::parse(registration.license_number.as_str()) {
            errors.push(ValidationError::new("license_number", ValidationCode::InvalidFormat, err.to_string()));
        }

        errors
    }

    fn check_driver_id(driver_id: &str) -> Result<(), AppError> {
        if IdGenerator::validate_id(driver_id, Some(IdType::Driver)) {
            Ok(())
        } else {
            tracing::warn!("Invalid driver ID format: {}", driver_id);
            Err(AppError::InvalidDriverId(driver_id.to_string()))
        }
    }
}

#[async_trait]
impl DriverOperations for DriverService {
    async fn register_driver(&self, registration: DriverRegistration) -> Result<Driver, AppError> {
        tracing::info!("Registering driver: {}", registration.username);

        let mut errors = Self::validate_registration(&registration);
        let username_is_well_formed = !errors.iter().any(|e| e.field == "username");
        if username_is_well_formed && self.identity.username_exists(&registration.username).await {
            errors.push(ValidationError::new(
                "username",
                ValidationCode::DuplicateUsername,
                IdentityError::DuplicateUsername(registration.username.clone()).to_string(),
            ));
        }

        if !errors.is_empty() {
            tracing::warn!("Driver registration rejected with {} field errors", errors.len());
            return Err(AppError::ValidationFailed(errors));
        }

        let license_number = LicenseNumber::parse(registration.license_number)?;
        let new_driver = NewDriver {
            username: registration.username,
            password: registration.password,
            first_name: registration.first_name.unwrap_or_default(),
            last_name: registration.last_name.unwrap_or_default(),
            license_number: Some(license_number),
            is_admin: false,
        };

        // The provider re-checks uniqueness under its write lock.
        let driver = self.identity.create_user(new_driver).await?;

        tracing::info!("Driver registered successfully: {}", driver.id);
        Ok(driver)
    }

    async fn get_driver(&self, driver_id: &str) -> Result<Driver, AppError> {
        Self::check_driver_id(driver_id)?;
        tracing::debug!("Getting driver: {}", driver_id);

        self.identity
            .get_driver(driver_id)
            .await
            .ok_or_else(|| AppError::driver_not_found(driver_id))
    }

    async fn list_drivers(&self, params: &HashMap<String, String>) -> Result<SearchResult<Driver>, AppError> {
        let predicate = build_predicate(EntityKind::Driver, params);
        let page_number = PageNumber::parse(params.get("page").map(String::as_str));
        tracing::debug!("Listing drivers: search={:?} page={:?}", predicate.query(), page_number);

        let drivers = self.identity.list_drivers().await;
        let page = list_page(&drivers, &BaseOrdering::Insertion, &predicate, page_number, self.page_size);

        Ok(SearchResult::new(page, &predicate))
    }

    async fn update_license_number(&self, driver_id: &str, update: LicenseNumberUpdate) -> Result<Driver, AppError> {
        Self::check_driver_id(driver_id)?;
        let license_number = LicenseNumber::parse(update.license_number)?;

        tracing::info!("Updating license number for driver: {}", driver_id);
        let driver = self.identity.set_license_number(driver_id, license_number).await?;

        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::identity_service::InMemoryIdentity;

    fn service() -> DriverService {
        DriverService::new(Arc::new(InMemoryIdentity::new(4)), NonZeroUsize::new(5).unwrap())
    }

    fn form(license_number: &str) -> DriverRegistration {
        DriverRegistration {
            username: "new_user".into(),
            password: "user1test".into(),
            password_confirmation: "user1test".into(),
            first_name: Some("test first".into()),
            last_name: Some("test last".into()),
            license_number: license_number.into(),
        }
    }

    fn codes(errors: &[ValidationError]) -> Vec<(&str, ValidationCode)> {
        errors.iter().map(|e| (e.field.as_str(), e.code)).collect()
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(DriverService::validate_registration(&form("ABC54321")).is_empty());

        let without_names = DriverRegistration {
            first_name: None,
            last_name: None,
            ..form("ABC54321")
        };
        assert!(DriverService::validate_registration(&without_names).is_empty());
    }

    #[test]
    fn test_license_number_rules_apply_to_form() {
        for bad in ["ABC5432", "AB354321", "ABCD4321"] {
            let errors = DriverService::validate_registration(&form(bad));
            assert_eq!(codes(&errors), [("license_number", ValidationCode::InvalidFormat)], "{}", bad);
        }
    }

    #[test]
    fn test_all_field_errors_are_collected() {
        let registration = DriverRegistration {
            username: "bad name!".into(),
            password: "1234".into(),
            password_confirmation: "4321".into(),
            first_name: None,
            last_name: None,
            license_number: "abc12345".into(),
        };

        let errors = DriverService::validate_registration(&registration);
        assert_eq!(
            codes(&errors),
            [
                ("username", ValidationCode::InvalidUsername),
                ("password", ValidationCode::PasswordTooShort),
                ("password", ValidationCode::PasswordEntirelyNumeric),
                ("password_confirmation", ValidationCode::PasswordMismatch),
                ("license_number", ValidationCode::InvalidFormat),
            ]
        );
    }

    #[test]
    fn test_password_longer_than_bcrypt_input_is_rejected() {
        let long = "a".repeat(MAX_PASSWORD_BYTES + 1);
        let registration = DriverRegistration {
            password: long.clone(),
            password_confirmation: long,
            ..form("ABC54321")
        };
        let errors = DriverService::validate_registration(&registration);
        assert_eq!(codes(&errors), [("password", ValidationCode::PasswordTooLong)]);

        // Multi-byte characters count by their encoded length.
        let wide = "é".repeat(MAX_PASSWORD_BYTES / 2 + 1);
        let registration = DriverRegistration {
            password: wide.clone(),
            password_confirmation: wide,
            ..form("ABC54321")
        };
        let errors = DriverService::validate_registration(&registration);
        assert_eq!(codes(&errors), [("password", ValidationCode::PasswordTooLong)]);

        let exact = "a".repeat(MAX_PASSWORD_BYTES);
        let registration = DriverRegistration {
            password: exact.clone(),
            password_confirmation: exact,
            ..form("ABC54321")
        };
        assert!(DriverService::validate_registration(&registration).is_empty());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = DriverService::validate_registration(&DriverRegistration::default());
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.code == ValidationCode::Required));
    }

    #[tokio::test]
    async fn test_register_persists_fields_verbatim() {
        let service = service();
        let registration = DriverRegistration {
            first_name: Some("  test First ".into()),
            ..form("ABC12349")
        };

        let driver = service.register_driver(registration).await.unwrap();
        assert_eq!(driver.username, "new_user");
        assert_eq!(driver.first_name, "  test First ");
        assert_eq!(driver.last_name, "test last");
        assert_eq!(driver.license_number.as_ref().map(LicenseNumber::as_str), Some("ABC12349"));
        assert!(!driver.is_admin);

        let stored = service.get_driver(&driver.id).await.unwrap();
        assert_eq!(stored, driver);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_reported_with_other_errors() {
        let service = service();
        service.register_driver(form("ABC12349")).await.unwrap();

        let err = service.register_driver(form("ABC1234")).await.unwrap_err();
        match err {
            AppError::ValidationFailed(errors) => assert_eq!(
                codes(&errors),
                [
                    ("license_number", ValidationCode::InvalidFormat),
                    ("username", ValidationCode::DuplicateUsername),
                ]
            ),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_drivers_searches_usernames() {
        let service = service();
        for i in 0..7 {
            let registration = DriverRegistration {
                username: format!("Test{}", i),
                password: format!("test_driver{}", i),
                password_confirmation: format!("test_driver{}", i),
                first_name: None,
                last_name: None,
                license_number: format!("ABC1234{}", i),
            };
            service.register_driver(registration).await.unwrap();
        }

        let params = HashMap::from([("username".to_string(), "test1".to_string())]);
        let result = service.list_drivers(&params).await.unwrap();
        assert_eq!(result.search, "test1");
        assert_eq!(result.page.items.len(), 1);
        assert_eq!(result.page.items[0].username, "Test1");

        let params = HashMap::from([("page".to_string(), "2".to_string())]);
        let result = service.list_drivers(&params).await.unwrap();
        let names: Vec<_> = result.page.items.iter().map(|d| d.username.as_str()).collect();
        assert_eq!(names, ["Test5", "Test6"]);
        assert!(result.page.is_paginated);
    }

    #[tokio::test]
    async fn test_update_license_number() {
        let service = service();
        let driver = service.register_driver(form("ABC12349")).await.unwrap();

        let updated = service
            .update_license_number(&driver.id, LicenseNumberUpdate { license_number: "XYZ99999".into() })
            .await
            .unwrap();
        assert_eq!(updated.license_number.unwrap().as_str(), "XYZ99999");

        let rejected = service
            .update_license_number(&driver.id, LicenseNumberUpdate { license_number: "XYZ9999".into() })
            .await;
        assert!(matches!(rejected, Err(AppError::ValidationFailed(_))));

        let unknown = service
            .update_license_number("not-an-id", LicenseNumberUpdate { license_number: "XYZ99999".into() })
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidDriverId(_))));
    }
}
