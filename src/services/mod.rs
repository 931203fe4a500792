pub mod car_service;
pub mod driver_service;
pub mod identity_service;
pub mod manufacturer_service;
pub mod store;
