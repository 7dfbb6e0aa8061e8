use crate::models::vehicle::{CreateVehicleRequest, Vehicle, VehicleUpdate};
use crate::repositories::vehicle_repository::{VehicleRepository, DEFAULT_PAGE_SIZE};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_vehicle_request;
use std::sync::Arc;
use tracing::{debug, info};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_page(&self, page: u32) -> AppResult<Vec<Vehicle>> {
        debug!("📄 Listando página {} de vehículos", page);
        self.repository.list_page(page, DEFAULT_PAGE_SIZE).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.count().await
    }

    pub async fn find_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.repository.find_by_plate(plate).await?;

        if vehicles.is_empty() {
            return Err(AppError::NotFound(format!(
                "Vehicle not found for plate: {}",
                plate
            )));
        }

        Ok(vehicles)
    }

    pub async fn create(&self, request: Option<CreateVehicleRequest>) -> AppResult<Vehicle> {
        // Validar campos
        let errors = validate_vehicle_request(request.as_ref());
        let vehicle = match request.and_then(CreateVehicleRequest::into_vehicle) {
            Some(vehicle) if errors.is_empty() => vehicle,
            _ => return Err(AppError::Validation(errors)),
        };

        let saved = self.repository.save(vehicle).await?;
        info!("🚗 Vehículo creado: id={:?} plate={}", saved.id, saved.plate);
        Ok(saved)
    }

    /// Devuelve None si el vehículo no existe
    ///
    /// El cuerpo se interpreta solo después de comprobar que el id existe.
    pub async fn update(&self, id: i64, body: serde_json::Value) -> AppResult<Option<Vehicle>> {
        let Some(mut vehicle) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let changes: VehicleUpdate = serde_json::from_value(body)
            .map_err(|e| AppError::UnprocessableBody(e.to_string()))?;
        vehicle.apply(changes);
        let saved = self.repository.save(vehicle).await?;
        info!("✏️ Vehículo {} actualizado", id);
        Ok(Some(saved))
    }

    /// Devuelve false si el vehículo no existe
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.repository.delete_by_id(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryVehicleRepository;

    fn controller() -> VehicleController {
        VehicleController::new(Arc::new(InMemoryVehicleRepository::new()))
    }

    fn request() -> CreateVehicleRequest {
        CreateVehicleRequest {
            plate: Some("ABC1234".to_string()),
            model: Some("Civic".to_string()),
            manufacturer: Some("Honda".to_string()),
            color: Some("Black".to_string()),
            active: Some(true),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let controller = controller();
        let vehicle = controller.create(Some(request())).await.unwrap();

        assert!(vehicle.id.is_some());
        assert_eq!(vehicle.plate, "ABC1234");
        assert_eq!(controller.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request_without_saving() {
        let controller = controller();
        let invalid = CreateVehicleRequest {
            manufacturer: None,
            ..request()
        };

        match controller.create(Some(invalid)).await {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors, vec!["Request without vehicle manufacturer."]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(controller.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_null_body() {
        let result = controller().create(None).await;
        assert!(matches!(result, Err(AppError::Validation(ref e)) if e == &["Request without vehicle."]));
    }

    #[tokio::test]
    async fn test_find_by_plate_not_found() {
        let result = controller().find_by_plate("NOPE000").await;
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Vehicle not found for plate: NOPE000"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let controller = controller();
        let changes = serde_json::json!({
            "plate": "X",
            "model": "Y",
            "manufacturer": "Z",
            "color": "W",
            "active": true
        });

        assert_eq!(controller.update(5, changes).await.unwrap(), None);
        assert!(!controller.delete(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_id_wins_over_incomplete_body() {
        let controller = controller();
        let result = controller.update(5, serde_json::json!({ "plate": "X" })).await;
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_existing_with_incomplete_body() {
        let controller = controller();
        let id = controller.create(Some(request())).await.unwrap().id.unwrap();

        let result = controller.update(id, serde_json::json!({ "plate": "X" })).await;
        assert!(matches!(result, Err(AppError::UnprocessableBody(_))));
        assert_eq!(controller.find_by_plate("ABC1234").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let controller = controller();
        let id = controller.create(Some(request())).await.unwrap().id.unwrap();

        assert!(controller.delete(id).await.unwrap());
        assert_eq!(controller.count().await.unwrap(), 0);
        assert!(controller.find_by_plate("ABC1234").await.is_err());
    }
}
