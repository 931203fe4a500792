// src/models/car.rs
use serde::{Deserialize, Serialize};

use crate::query::{EntityKind, Searchable};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub manufacturer_id: String,
}

impl Searchable for Car {
    const KIND: EntityKind = EntityKind::Car;

    fn search_value(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarCreate {
    pub model: String,
    pub manufacturer_id: String,
}
