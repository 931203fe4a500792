pub mod id_generator;
pub mod license_number;
