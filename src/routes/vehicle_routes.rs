use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use crate::models::vehicle::{CreateVehicleRequest, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Router de vehículos, montado en `/api/vehicles`
///
/// El segmento `/:id` es la matrícula en GET y el id numérico en PUT/DELETE;
/// el router no admite dos nombres de parámetro en la misma posición.
pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/count", get(count_vehicles))
        .route("/page/:page", get(list_vehicles_page))
        .route(
            "/:id",
            get(get_vehicles_by_plate)
                .put(update_vehicle)
                .delete(delete_vehicle),
        )
}

async fn list_vehicles_page(
    State(state): State<AppState>,
    Path(page): Path<u32>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.vehicle_controller().list_page(page).await?;
    Ok(Json(vehicles))
}

async fn count_vehicles(State(state): State<AppState>) -> AppResult<Json<i64>> {
    let count = state.vehicle_controller().count().await?;
    Ok(Json(count))
}

async fn get_vehicles_by_plate(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.vehicle_controller().find_by_plate(&plate).await?;
    Ok(Json(vehicles))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<Option<CreateVehicleRequest>>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.vehicle_controller().create(request).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Response> {
    let response = match state.vehicle_controller().update(id, body).await? {
        Some(vehicle) => Json(vehicle).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if state.vehicle_controller().delete(id).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
