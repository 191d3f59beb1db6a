use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use image_to_s3_api::{
    db::postgres::{create_pool, run_migrations},
    fetch::http::HttpImageSource,
    graceful_shutdown::shutdown_signal,
    repositories::sqlx_repo::SqlxImageRepo,
    routes::configure_routes,
    settings::AppConfig,
    storage::s3::S3ObjectStore,
    telemetry::init_tracing,
    web::cors::build_cors,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to create database connection pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    tokio::fs::create_dir_all(&config.scratch_dir)
        .await
        .with_context(|| format!("Failed to create scratch directory {}", config.scratch_dir.display()))?;

    let object_store = S3ObjectStore::from_config(&config).await;
    let image_source = HttpImageSource::new(config.fetch_timeout())?;

    let app_state = web::Data::new(AppState::new(
        &config,
        Arc::new(SqlxImageRepo::new(pool)),
        Arc::new(object_store),
        Arc::new(image_source),
    ));

    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {} (bucket: {})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.s3_bucket
    );

    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_config))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(server_addr.as_str())?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.stop(true).await;
    });

    server.await?;
    tracing::info!("Server stopped");

    Ok(())
}
