pub mod auth;
pub mod car_handler;
pub mod driver_handler;
pub mod manufacturer_handler;
