//! Repositorios
//!
//! Acceso a datos de vehículos: el trait `VehicleRepository` y sus
//! implementaciones sobre PostgreSQL y en memoria.

pub mod memory_vehicle_repository;
pub mod vehicle_repository;

pub use memory_vehicle_repository::InMemoryVehicleRepository;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository, DEFAULT_PAGE_SIZE};
