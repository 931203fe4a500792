// src/services/manufacturer_service.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing;

use crate::{
    errors::{FleetError as AppError, ValidationCode, ValidationError},
    models::manufacturer::{Manufacturer, ManufacturerCreate},
    query::{build_predicate, list_page, BaseOrdering, EntityKind, PageNumber, SearchResult},
    services::store::MemoryStore,
    utils::id_generator::{IdGenerator, IdType},
};

#[async_trait]
pub trait ManufacturerOperations: Send + Sync {
    async fn create_manufacturer(&self, request: ManufacturerCreate) -> Result<Manufacturer, AppError>;
    async fn get_manufacturer(&self, manufacturer_id: &str) -> Result<Manufacturer, AppError>;
    async fn list_manufacturers(&self, params: &HashMap<String, String>) -> Result<SearchResult<Manufacturer>, AppError>;
}

pub struct ManufacturerService {
    store: MemoryStore<Manufacturer>,
    page_size: NonZeroUsize,
}

impl ManufacturerService {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            store: MemoryStore::new(),
            page_size,
        }
    }
}

pub(crate) fn require(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, ValidationCode::Required, "This field is required."));
    }
}

#[async_trait]
impl ManufacturerOperations for ManufacturerService {
    async fn create_manufacturer(&self, request: ManufacturerCreate) -> Result<Manufacturer, AppError> {
        let mut errors = Vec::new();
        require("name", &request.name, &mut errors);
        require("country", &request.country, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        let manufacturer = self
            .store
            .insert_with(|existing| Manufacturer {
                id: IdGenerator::generate_unique(IdType::Manufacturer, |id| existing.iter().any(|m| m.id == id)),
                name: request.name,
                country: request.country,
            })
            .await;

        tracing::info!("Manufacturer created: {} ({})", manufacturer.name, manufacturer.id);
        Ok(manufacturer)
    }

    async fn get_manufacturer(&self, manufacturer_id: &str) -> Result<Manufacturer, AppError> {
        self.store
            .find(|m| m.id == manufacturer_id)
            .await
            .ok_or_else(|| AppError::ManufacturerNotFound(manufacturer_id.to_string()))
    }

    async fn list_manufacturers(&self, params: &HashMap<String, String>) -> Result<SearchResult<Manufacturer>, AppError> {
        let predicate = build_predicate(EntityKind::Manufacturer, params);
        let page_number = PageNumber::parse(params.get("page").map(String::as_str));
        tracing::debug!("Listing manufacturers: search={:?} page={:?}", predicate.query(), page_number);

        let manufacturers = self.store.snapshot().await;
        let page = list_page(&manufacturers, &BaseOrdering::Insertion, &predicate, page_number, self.page_size);

        Ok(SearchResult::new(page, &predicate))
    }
}
