//! Clinisys
//!
//! Main entry point for the Clinisys clinic-management server.

use actix_cors::Cors;
use actix_files as fs;
use actix_web::{web, App, HttpServer};
use clinisys::{api, config, db, session};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = config::load_config()?;

    // Connect to database and bring the schema up to date
    let database = db::Database::connect(&config.database).await?;
    database.run_migrations().await?;
    database.seed_admin(&config.admin).await?;

    // Create app state
    let database = web::Data::new(database);
    let sessions = web::Data::new(session::Sessions::new(config.session.ttl_hours));
    let static_dir = config.server.static_dir.clone();
    let bind_addr = (config.server.host.clone(), config.server.port);
    let config = web::Data::new(config);

    tracing::info!(host = %bind_addr.0, port = bind_addr.1, "starting http server");

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add app state
            .app_data(database.clone())
            .app_data(sessions.clone())
            .app_data(config.clone())
            // Request logging
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            // API and page routes
            .configure(api::configure)
            // Serve remaining static assets from the public directory
            .service(fs::Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
