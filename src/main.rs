use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use opmigrate_mock_backend::config::Config;
use opmigrate_mock_backend::routes;
use opmigrate_mock_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration - try multiple paths, defaults when none exist
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let (mut config, loaded_path) = Config::discover(&config_paths)?;
    config.apply_overrides(|name| std::env::var(name).ok())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match &loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let addr = config.socket_addr()?;
    let app = routes::create_routes(AppState::stub(config));

    info!("Starting mock translation backend on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
