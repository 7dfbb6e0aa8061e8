//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::vehicle_controller::VehicleController;
use crate::repositories::{InMemoryVehicleRepository, VehicleRepository};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn VehicleRepository>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn VehicleRepository>, config: EnvironmentConfig) -> Self {
        Self { repository, config }
    }

    /// Estado con un store en memoria vacío
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(Arc::new(InMemoryVehicleRepository::new()), config)
    }

    /// Controller de vehículos sobre el repositorio compartido
    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.repository.clone())
    }
}
