// src/utils/id_generator.rs
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdType {
    Driver,
    Manufacturer,
    Car,
}

impl IdType {
    pub fn to_prefix(&self) -> &'static str {
        match self {
            IdType::Driver => "drv",
            IdType::Manufacturer => "mfr",
            IdType::Car => "car",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "drv" => Some(IdType::Driver),
            "mfr" => Some(IdType::Manufacturer),
            "car" => Some(IdType::Car),
            _ => None,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_prefix())
    }
}

pub struct IdGenerator;

const SUFFIX_LENGTH: usize = 5;
const SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

impl IdGenerator {
    /// Generate an ID with format: {prefix}-{yymmdd}-{suffix}
    /// where suffix is 5 random alphanumeric characters.
    pub fn generate(id_type: IdType) -> String {
        Self::generate_with_timestamp(id_type, Utc::now())
    }

    /// Generate ID with a specific timestamp (useful for testing)
    pub fn generate_with_timestamp(id_type: IdType, timestamp: DateTime<Utc>) -> String {
        let date_part = timestamp.format("%y%m%d").to_string();
        format!("{}-{}-{}", id_type.to_prefix(), date_part, Self::generate_random_suffix())
    }

    /// Generate IDs until one is not `taken`. Callers hold the lock guarding
    /// the collection `taken` inspects.
    pub fn generate_unique<F>(id_type: IdType, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let id = Self::generate(id_type);
            if !taken(&id) {
                return id;
            }
            tracing::debug!("Regenerating colliding {} id: {}", id_type, id);
        }
    }

    fn generate_random_suffix() -> String {
        let mut rng = rand::rng();
        (0..SUFFIX_LENGTH)
            .map(|_| SUFFIX_CHARS[rng.random_range(0..SUFFIX_CHARS.len())] as char)
            .collect()
    }

    /// The type encoded in a well-formed ID, or `None` when the prefix, date
    /// or suffix is malformed.
    fn parse_id(id: &str) -> Option<IdType> {
        let mut parts = id.split('-');
        let (prefix, date_part, suffix) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        if date_part.len() != 6 || suffix.len() != SUFFIX_LENGTH {
            return None;
        }
        if !date_part.bytes().all(|b| b.is_ascii_digit()) || !suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }

        NaiveDate::parse_from_str(date_part, "%y%m%d").ok()?;
        IdType::from_prefix(prefix)
    }

    /// Validate if an ID matches the expected format and type
    pub fn validate_id(id: &str, expected_type: Option<IdType>) -> bool {
        match Self::parse_id(id) {
            Some(id_type) => expected_type.is_none_or(|expected| id_type == expected),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::Cell;

    #[test]
    fn test_id_generation() {
        let driver_id = IdGenerator::generate(IdType::Driver);
        assert!(driver_id.starts_with("drv-"));
        assert_eq!(driver_id.split('-').count(), 3);

        let car_id = IdGenerator::generate(IdType::Car);
        assert!(car_id.starts_with("car-"));
    }

    #[test]
    fn test_id_parsing() {
        let test_date = Utc.with_ymd_and_hms(2025, 10, 18, 0, 0, 0).unwrap();
        let id = IdGenerator::generate_with_timestamp(IdType::Manufacturer, test_date);

        assert!(id.starts_with("mfr-251018-"));
        assert_eq!(IdGenerator::parse_id(&id), Some(IdType::Manufacturer));
    }

    #[test]
    fn test_validation() {
        let valid_id = "drv-251018-a1b2c";
        assert!(IdGenerator::validate_id(valid_id, Some(IdType::Driver)));
        assert!(!IdGenerator::validate_id(valid_id, Some(IdType::Car)));
        assert!(IdGenerator::validate_id(valid_id, None));

        assert!(!IdGenerator::validate_id("invalid-format", None));
        assert!(!IdGenerator::validate_id("drv-251318-a1b2c", None));
        assert!(!IdGenerator::validate_id("drv-250231-a1b2c", None));
        assert!(!IdGenerator::validate_id("drv-251018-a1b2c-x", None));
        assert!(!IdGenerator::validate_id("usr-251018-a1b2c", None));
    }

    #[test]
    fn test_random_suffix_pattern() {
        for _ in 0..100 {
            let suffix = IdGenerator::generate_random_suffix();
            assert_eq!(suffix.len(), SUFFIX_LENGTH);
            assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()), "bad suffix: {}", suffix);
        }
    }

    #[test]
    fn test_generate_unique_skips_taken_ids() {
        let attempts = Cell::new(0);
        let id = IdGenerator::generate_unique(IdType::Car, |_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 3
        });

        assert_eq!(attempts.get(), 3);
        assert!(IdGenerator::validate_id(&id, Some(IdType::Car)));
    }
}
