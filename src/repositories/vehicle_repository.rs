use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppResult};

/// Tamaño de página por defecto del listado
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Operaciones de persistencia sobre vehículos
///
/// Cada llamada es atómica por sí misma; no hay transacciones entre llamadas.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Página `page` (base 0) de `page_size` registros, en orden ascendente de id
    async fn list_page(&self, page: u32, page_size: u32) -> AppResult<Vec<Vehicle>>;

    /// Número total de registros
    async fn count(&self) -> AppResult<i64>;

    /// Búsqueda exacta por matrícula; puede devolver varios registros
    async fn find_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    /// Inserta si `vehicle.id` es None, si no sobrescribe el registro existente
    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Borrar por id; no falla si el id no existe
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Offset de la página en filas
pub(crate) fn page_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page).saturating_mul(i64::from(page_size))
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (plate, model, manufacturer, color, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, plate, model, manufacturer, color, active
            "#
        )
        .bind(vehicle.plate)
        .bind(vehicle.model)
        .bind(vehicle.manufacturer)
        .bind(vehicle.color)
        .bind(vehicle.active)
        .fetch_one(&self.pool)
        .await?;

        debug!("💾 Vehículo insertado con id {:?}", vehicle.id);
        Ok(vehicle)
    }

    async fn overwrite(&self, id: i64, vehicle: Vehicle) -> AppResult<Vehicle> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, model = $3, manufacturer = $4, color = $5, active = $6
            WHERE id = $1
            RETURNING id, plate, model, manufacturer, color, active
            "#
        )
        .bind(id)
        .bind(vehicle.plate)
        .bind(vehicle.model)
        .bind(vehicle.manufacturer)
        .bind(vehicle.color)
        .bind(vehicle.active)
        .fetch_optional(&self.pool)
        .await?;

        let updated = updated.ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        debug!("💾 Vehículo {} sobrescrito", id);
        Ok(updated)
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list_page(&self, page: u32, page_size: u32) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, plate, model, manufacturer, color, active
            FROM vehicles
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#
        )
        .bind(i64::from(page_size))
        .bind(page_offset(page, page_size))
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id, plate, model, manufacturer, color, active FROM vehicles WHERE plate = $1 ORDER BY id"
        )
        .bind(plate)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT id, plate, model, manufacturer, color, active FROM vehicles WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        match vehicle.id {
            Some(id) => self.overwrite(id, vehicle).await,
            None => self.insert(vehicle).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(0, DEFAULT_PAGE_SIZE), 0);
        assert_eq!(page_offset(3, DEFAULT_PAGE_SIZE), 30);
        assert_eq!(page_offset(u32::MAX, DEFAULT_PAGE_SIZE), 42_949_672_950);
        assert_eq!(page_offset(u32::MAX, u32::MAX), i64::MAX);
    }
}
