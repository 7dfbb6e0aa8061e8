//! Configuración de conexión a PostgreSQL
//!
//! Este módulo crea el pool de conexiones y aplica las migraciones del
//! directorio `migrations/`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;

    info!("✅ PostgreSQL conectado exitosamente");
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error ejecutando migraciones")?;

    info!("📦 Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|pos| pos + 3) else {
        return url.to_string();
    };
    let Some(at_pos) = url.rfind('@').filter(|&pos| pos > scheme_end) else {
        return url.to_string();
    };

    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
