use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fleet_vehicles::config::{EnvironmentConfig, StorageBackend};
use fleet_vehicles::create_app;
use fleet_vehicles::database;
use fleet_vehicles::repositories::{InMemoryVehicleRepository, PgVehicleRepository, VehicleRepository};
use fleet_vehicles::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🚗 Fleet Vehicles API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    if config.is_development() {
        info!("🛠️ Entorno: {} (modo desarrollo)", config.environment);
    } else {
        info!("🏭 Entorno: {}", config.environment);
    }

    // Inicializar persistencia
    let repository: Arc<dyn VehicleRepository> = match (&config.storage, &config.database) {
        (StorageBackend::Postgres, Some(db_config)) => {
            let pool = database::create_pool(db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            if config.run_migrations {
                database::run_migrations(&pool).await?;
            }
            Arc::new(PgVehicleRepository::new(pool))
        }
        (StorageBackend::Postgres, None) => {
            return Err(anyhow::anyhow!("DATABASE_URL must be set"));
        }
        (StorageBackend::Memory, _) => {
            info!("🧠 Usando store en memoria (los datos se pierden al reiniciar)");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(repository, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/vehicles/page/:page - Listar vehículos (10 por página)");
    info!("   GET    /api/vehicles/count - Contar vehículos");
    info!("   GET    /api/vehicles/:plate - Buscar por matrícula");
    info!("   POST   /api/vehicles - Crear vehículo");
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
