use anyhow::Result;
use axum::Router;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_backend::backend::storage::{CsvConnection, DbConnection};
use attendance_backend::{create_router, initialize_backend, AppConfig, StorageKind};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting attendance server");
    let config = AppConfig::load()?;

    let app: Router = match config.storage {
        StorageKind::Sqlite => {
            info!("Using SQLite storage at {}", config.database_url);
            let connection = DbConnection::new(&config.database_url).await?;
            create_router(initialize_backend(connection, &config.password), &config.cors_origin)?
        }
        StorageKind::Csv => {
            info!("Using CSV storage in {}", config.data_directory.display());
            let connection = CsvConnection::new(&config.data_directory)?;
            create_router(initialize_backend(connection, &config.password), &config.cors_origin)?
        }
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server listening on {}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
