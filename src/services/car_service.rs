// src/services/car_service.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing;

use crate::{
    errors::{FleetError as AppError, ValidationCode, ValidationError},
    models::car::{Car, CarCreate},
    query::{build_predicate, list_page, BaseOrdering, EntityKind, PageNumber, SearchResult},
    services::manufacturer_service::{require, ManufacturerOperations},
    services::store::MemoryStore,
    utils::id_generator::{IdGenerator, IdType},
};

#[async_trait]
pub trait CarOperations: Send + Sync {
    async fn create_car(&self, request: CarCreate) -> Result<Car, AppError>;
    async fn list_cars(&self, params: &HashMap<String, String>) -> Result<SearchResult<Car>, AppError>;
}

pub struct CarService {
    store: MemoryStore<Car>,
    manufacturers: Arc<dyn ManufacturerOperations>,
    page_size: NonZeroUsize,
}

impl CarService {
    pub fn new(manufacturers: Arc<dyn ManufacturerOperations>, page_size: NonZeroUsize) -> Self {
        Self {
            store: MemoryStore::new(),
            manufacturers,
            page_size,
        }
    }
}

#[async_trait]
impl CarOperations for CarService {
    async fn create_car(&self, request: CarCreate) -> Result<Car, AppError> {
        let mut errors = Vec::new();
        require("model", &request.model, &mut errors);

        match self.manufacturers.get_manufacturer(&request.manufacturer_id).await {
            Ok(_) => {}
            Err(AppError::ManufacturerNotFound(id)) => errors.push(ValidationError::new(
                "manufacturer_id",
                ValidationCode::InvalidChoice,
                format!("Select a valid manufacturer. '{}' is not one of the available choices.", id),
            )),
            Err(other) => return Err(other),
        }

        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        let car = self
            .store
            .insert_with(|existing| Car {
                id: IdGenerator::generate_unique(IdType::Car, |id| existing.iter().any(|c| c.id == id)),
                model: request.model,
                manufacturer_id: request.manufacturer_id,
            })
            .await;

        tracing::info!("Car created: {} ({})", car.model, car.id);
        Ok(car)
    }

    async fn list_cars(&self, params: &HashMap<String, String>) -> Result<SearchResult<Car>, AppError> {
        let predicate = build_predicate(EntityKind::Car, params);
        let page_number = PageNumber::parse(params.get("page").map(String::as_str));
        tracing::debug!("Listing cars: search={:?} page={:?}", predicate.query(), page_number);

        let cars = self.store.snapshot().await;
        let page = list_page(&cars, &BaseOrdering::Insertion, &predicate, page_number, self.page_size);

        Ok(SearchResult::new(page, &predicate))
    }
}
