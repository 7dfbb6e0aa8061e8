//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los cuerpos de request para las
//! operaciones CRUD. Mapea exactamente a la tabla `vehicles`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Vehicle principal - mapea a la tabla vehicles
///
/// `id` es `None` solo antes del primer `save`; el store lo asigna al insertar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Option<i64>,
    pub plate: String,
    pub model: String,
    pub manufacturer: String,
    pub color: String,
    pub active: bool,
}

impl Vehicle {
    /// Crear un vehículo todavía no persistido
    pub fn new(
        plate: impl Into<String>,
        model: impl Into<String>,
        manufacturer: impl Into<String>,
        color: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id: None,
            plate: plate.into(),
            model: model.into(),
            manufacturer: manufacturer.into(),
            color: color.into(),
            active,
        }
    }

    /// Sobrescribir los cinco campos mutables, conservando el id
    pub fn apply(&mut self, changes: VehicleUpdate) {
        self.plate = changes.plate;
        self.model = changes.model;
        self.manufacturer = changes.manufacturer;
        self.color = changes.color;
        self.active = changes.active;
    }
}

/// Request para crear un vehículo (POST)
///
/// Todos los campos son opcionales a nivel de JSON para que la validación
/// pueda reportar cada campo ausente en vez de fallar en la deserialización.
/// Un `id` enviado por el cliente se ignora.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(required, length(min = 1))]
    pub plate: Option<String>,

    #[validate(required, length(min = 1))]
    pub model: Option<String>,

    #[validate(required, length(min = 1))]
    pub manufacturer: Option<String>,

    #[validate(required, length(min = 1))]
    pub color: Option<String>,

    #[validate(required)]
    pub active: Option<bool>,
}

impl CreateVehicleRequest {
    /// Convertir a Vehicle; devuelve None si falta algún campo.
    /// Llamar solo después de validar.
    pub fn into_vehicle(self) -> Option<Vehicle> {
        Some(Vehicle::new(
            self.plate?,
            self.model?,
            self.manufacturer?,
            self.color?,
            self.active?,
        ))
    }
}

/// Request para actualizar un vehículo existente (PUT)
///
/// Reemplazo completo: los cinco campos son obligatorios.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleUpdate {
    pub plate: String,
    pub model: String,
    pub manufacturer: String,
    pub color: String,
    pub active: bool,
}
