//! Balance service - main entry point.
//!
//! Connects to the database, runs migrations, seeds the initial account, and
//! only then starts the Actix-web server.

use actix_files::Files;
use actix_web::{App, HttpServer, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use balance_service::api;
use balance_service::config::Config;
use balance_service::db::{self, DbPool};
use balance_service::error::{AppError, AppResult};
use balance_service::middleware::RequestLogger;

/// Startup sequence: connect, migrate, verify schema, seed.
///
/// Each step requires the prior one's success. Any failure here is fatal to
/// the process; restart is the recovery mechanism.
async fn bootstrap(config: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(config).await?;
    pool.ping().await?;
    info!("Connection to the database has been established successfully");

    pool.run_migrations().await?;
    info!("Migrations have been run successfully");

    pool.assert_schema_synced().await?;
    info!("Account schema synchronized successfully");

    match db::accounts::seed_default_account(pool.connection()).await? {
        Some(_) => info!("Initial account created successfully"),
        None => info!("Account already present, seed skipped"),
    }

    Ok(pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("RUST_ENV must be set to 'development' or 'production';");
            error!("in production, DATABASE_URL must not match the development default.");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Balance Service");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Connect -> migrate -> schema check -> seed, before accepting traffic
    let pool = match bootstrap(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Unable to initialize the database: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();

    if serve_static {
        info!("Static file serving enabled from {:?}", static_dir);
    } else {
        warn!(
            "Static directory {:?} not found, static serving disabled",
            static_dir
        );
    }

    let worker_count = if config.is_development() {
        info!(
            "Server is running on http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Server is running on http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        let mut app = App::new()
            // Add request logging middleware
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(pool.clone()))
            // Map body and path extraction failures onto the JSON error shape
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(err.to_string()).into()
            }))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_openapi_routes),
            )
            // Balance endpoints live at the root path
            .configure(api::configure_balance_routes);

        // Serve static files (index.html) from the public directory
        if serve_static {
            app = app.service(Files::new("/", static_dir.clone()).index_file("index.html"));
        }

        app
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
