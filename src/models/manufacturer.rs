// src/models/manufacturer.rs
use serde::{Deserialize, Serialize};

use crate::query::{EntityKind, Searchable};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub country: String,
}

impl Searchable for Manufacturer {
    const KIND: EntityKind = EntityKind::Manufacturer;

    fn search_value(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerCreate {
    pub name: String,
    pub country: String,
}
