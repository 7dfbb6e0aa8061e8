use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::vehicle_repository::{page_offset, VehicleRepository};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Vehicle>,
    next_id: i64,
}

/// Store en memoria para ejecuciones locales sin PostgreSQL y para tests
///
/// Los ids empiezan en 1 y nunca se reutilizan tras un borrado.
#[derive(Debug)]
pub struct InMemoryVehicleRepository {
    table: RwLock<Table>,
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list_page(&self, page: u32, page_size: u32) -> AppResult<Vec<Vehicle>> {
        let table = self.table.read().await;
        let offset = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);

        Ok(table
            .rows
            .values()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<i64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|vehicle| vehicle.plate == plate)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut table = self.table.write().await;

        let id = match vehicle.id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(id) => return Err(not_found_error("Vehicle", &id.to_string())),
            None => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
        };

        vehicle.id = Some(id);
        table.rows.insert(id, vehicle.clone());
        debug!("💾 Vehículo {} guardado en memoria", id);

        Ok(vehicle)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }
}
