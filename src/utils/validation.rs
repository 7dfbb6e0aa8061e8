//! Utilidades de validación
//!
//! Reglas de campos obligatorios para la creación de vehículos. La validación
//! por campo la hace el derive de `validator`; aquí se traduce el resultado a
//! una lista ordenada de mensajes legibles.

use validator::Validate;

use crate::models::vehicle::CreateVehicleRequest;

/// Mensaje cuando el cuerpo del request es `null`
pub const MISSING_VEHICLE: &str = "Request without vehicle.";

/// Orden fijo de los campos y su mensaje de error
const REQUIRED_FIELDS: [(&str, &str); 5] = [
    ("plate", "Request without vehicle plate."),
    ("model", "Request without vehicle model."),
    ("manufacturer", "Request without vehicle manufacturer."),
    ("color", "Request without vehicle color."),
    ("active", "Request without vehicle status."),
];

/// Validar un request de creación de vehículo
///
/// Devuelve todas las reglas violadas, en orden, sin cortocircuito.
/// Una lista vacía significa que el request es válido.
pub fn validate_vehicle_request(request: Option<&CreateVehicleRequest>) -> Vec<String> {
    let Some(request) = request else {
        return vec![MISSING_VEHICLE.to_string()];
    };

    let errors = match request.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };
    let field_errors = errors.field_errors();

    REQUIRED_FIELDS
        .iter()
        .filter(|(field, _)| field_errors.contains_key(field))
        .map(|(_, message)| message.to_string())
        .collect()
}
