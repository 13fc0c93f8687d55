//! TopupStore Mini App backend
//!
//! Main application entry point

use std::sync::Arc;
use tracing::info;

use TopupStore::{
    config::Settings,
    database::{
        connection::{create_pool, run_migrations},
        DatabaseService,
    },
    handlers::{self, AppState},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must live until shutdown
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", TopupStore::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize database service and business services
    let database_service = DatabaseService::new(db_pool);
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), database_service)?;

    let state = AppState {
        services: Arc::new(services),
        settings: settings.clone(),
    };

    let app = handlers::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "TopupStore API is ready");

    axum::serve(listener, app).await?;

    info!("TopupStore has been shut down.");

    Ok(())
}
