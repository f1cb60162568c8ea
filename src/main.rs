// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use skillsync_backend::ai::AiClient;
use skillsync_backend::config::Config;
use skillsync_backend::error::AppError;
use skillsync_backend::models::user::{Role, User};
use skillsync_backend::routes;
use skillsync_backend::services::users;
use skillsync_backend::state::AppState;
use skillsync_backend::store::{Store, seed};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Open the entity store
    let store = Arc::new(Store::open(&config.data_dir).expect("Failed to open data directory"));
    tracing::info!("Store opened at {}", config.data_dir);

    // First-run bootstrap
    seed::seed_demo_data(&store)
        .await
        .expect("Failed to seed demo data");

    // Seed Admin User from environment override
    if let Err(e) = seed_admin_user(&store, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    // Create AppState
    let state = AppState {
        store: store.clone(),
        config: config.clone(),
        ai: AiClient::from_config(&config),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("SkillSync listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn seed_admin_user(store: &Store, config: &Config) -> Result<(), AppError> {
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if users::find_by_email(store, email).await?.is_some() {
            return Ok(());
        }

        tracing::info!("Seeding admin user: {}", email);
        let mut admin = User::new(
            "Admin".to_string(),
            email.clone(),
            password.clone(),
            None,
        );
        admin.role = Role::Admin;
        users::add(store, admin).await?;
        tracing::info!("Admin user created successfully.");
    }
    Ok(())
}
