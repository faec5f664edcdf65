use server_http::{build_router, AppState};
use shared::config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO_IDENTITY_COUNT: usize = 12;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting console HTTP server...");

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    if let Err(e) = run(config).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> shared::Result<()> {
    let base_path = std::path::Path::new(&config.data_dir).join(".console");
    let state = AppState::open(&base_path, config.self_identity.clone())?;

    let admin = state.bootstrap().await?;
    info!("Acting as {} ({})", admin.name, admin.id);

    if config.seed_demo_data {
        let seed = state.seed_demo_data(DEMO_IDENTITY_COUNT).await?;
        info!(
            "Demo data: {} users, {} groups, {} grants created",
            seed.identities, seed.groups, seed.grants
        );
    }

    let router = build_router(state, &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| shared::Error::Internal(format!("cannot bind {}: {}", address, e)))?;

    info!("HTTP Server listening on http://{}", address);
    info!("Try: curl http://{}/api/groups", address);

    // Graceful shutdown handler
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| shared::Error::Internal(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
