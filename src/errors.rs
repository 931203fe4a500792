use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::identity_service::IdentityError;
use crate::utils::license_number::LicenseNumberError;

/// Main error type for the taxi-fleet service
#[derive(Debug)]
pub enum FleetError {
    // HTTP and API errors
    Unauthorized(String),
    Forbidden(String),
    InternalServer(String),

    // Business logic errors
    DriverNotFound(String),
    ManufacturerNotFound(String),
    InvalidDriverId(String),

    // Validation errors
    ValidationFailed(Vec<ValidationError>),

    // Security and authentication errors
    TokenInvalid,
    InvalidCredentials,
    PasswordHashing(String),

    // Configuration and setup errors
    Configuration(String),
}

/// Machine-readable reason attached to a field-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    Required,
    InvalidFormat,
    InvalidChoice,
    InvalidUsername,
    DuplicateUsername,
    PasswordMismatch,
    PasswordTooShort,
    PasswordTooLong,
    PasswordEntirelyNumeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            FleetError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            FleetError::InternalServer(msg) => write!(f, "Internal server error: {}", msg),

            FleetError::DriverNotFound(id) => write!(f, "Driver not found: {}", id),
            FleetError::ManufacturerNotFound(id) => write!(f, "Manufacturer not found: {}", id),
            FleetError::InvalidDriverId(id) => write!(f, "Invalid driver ID: {}", id),

            FleetError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }

            FleetError::TokenInvalid => write!(f, "Authentication token is invalid"),
            FleetError::InvalidCredentials => write!(f, "Invalid username or password"),
            FleetError::PasswordHashing(msg) => write!(f, "Password hashing error: {}", msg),

            FleetError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for FleetError {}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            FleetError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            FleetError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),

            FleetError::ValidationFailed(errors) => {
                let details = serde_json::to_value(&errors).ok();
                (StatusCode::BAD_REQUEST, "validation_failed", "Validation errors occurred".to_string(), details)
            }

            FleetError::DriverNotFound(id) | FleetError::InvalidDriverId(id) => {
                (StatusCode::NOT_FOUND, "driver_not_found", format!("Driver not found: {}", id), None)
            }
            FleetError::ManufacturerNotFound(id) => {
                (StatusCode::NOT_FOUND, "manufacturer_not_found", format!("Manufacturer not found: {}", id), None)
            }

            FleetError::TokenInvalid => (StatusCode::UNAUTHORIZED, "token_invalid", "Authentication token is invalid".to_string(), None),
            FleetError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials", "Invalid username or password".to_string(), None),

            // All other errors are treated as internal server errors
            other => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", other.to_string(), None),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

// Convenience type alias for Results
pub type FleetResult<T> = Result<T, FleetError>;

impl From<LicenseNumberError> for FleetError {
    fn from(err: LicenseNumberError) -> Self {
        FleetError::ValidationFailed(vec![ValidationError::new(
            "license_number",
            ValidationCode::InvalidFormat,
            err.to_string(),
        )])
    }
}

impl From<IdentityError> for FleetError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::DuplicateUsername(_) => FleetError::ValidationFailed(vec![ValidationError::new(
                "username",
                ValidationCode::DuplicateUsername,
                err.to_string(),
            )]),
            IdentityError::UnknownDriver(id) => FleetError::DriverNotFound(id),
            IdentityError::Hashing(msg) => FleetError::PasswordHashing(msg),
        }
    }
}

// Helper functions for creating common errors
impl FleetError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        FleetError::Unauthorized(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        FleetError::InternalServer(msg.into())
    }

    pub fn driver_not_found(driver_id: impl Into<String>) -> Self {
        FleetError::DriverNotFound(driver_id.into())
    }
}
