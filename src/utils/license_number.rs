// src/utils/license_number.rs
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Three uppercase ASCII letters followed by five ASCII digits.
static LICENSE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn license_pattern() -> &'static Regex {
    LICENSE_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]{3}[0-9]{5}$").expect("license number pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LicenseNumberError {
    #[error("License number must be 3 uppercase letters followed by 5 digits, got '{0}'")]
    InvalidFormat(String),
}

/// Check a candidate license number, returning it unchanged when it is valid.
pub fn validate(candidate: &str) -> Result<&str, LicenseNumberError> {
    if license_pattern().is_match(candidate) {
        Ok(candidate)
    } else {
        Err(LicenseNumberError::InvalidFormat(candidate.to_string()))
    }
}

/// A license number that has passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseNumber(String);

impl LicenseNumber {
    pub fn parse(candidate: impl Into<String>) -> Result<Self, LicenseNumberError> {
        let candidate = candidate.into();
        validate(&candidate)?;
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LicenseNumber {
    type Error = LicenseNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LicenseNumber> for String {
    fn from(value: LicenseNumber) -> Self {
        value.0
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
