//! Service entrypoint

mod config;
mod handlers;

use anyhow::{Context, Result};
use config::{ServiceConfig, WriteStrategyKind};
use handlers::AppState;
use rwa_binder::{DirectUpload, RemoteUpload, StorageBinding, UploadStrategy};
use rwa_greenfield::{GreenfieldClient, ObjectStore};
use rwa_registry::EvmRegistry;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn build_state(config: &ServiceConfig) -> Result<AppState> {
    let registry = Arc::new(EvmRegistry::new(&config.registry, &config.chain_id)?);

    let greenfield_config = config.greenfield.to_client_config();
    let provider_filter = greenfield_config.provider_filter.clone();
    let store: Arc<dyn ObjectStore> = Arc::new(GreenfieldClient::new(greenfield_config)?);

    let uploader: Arc<dyn UploadStrategy> = match config.strategy {
        WriteStrategyKind::Direct => {
            Arc::new(DirectUpload::new(store.clone(), provider_filter))
        }
        WriteStrategyKind::Remote => {
            let proxy_url = config
                .proxy_url
                .as_ref()
                .context("remote strategy requires proxy_url")?;
            Arc::new(RemoteUpload::new(proxy_url.clone(), config.chain_id.clone()))
        }
    };

    let binding = StorageBinding::new(registry, store, uploader.clone());

    Ok(AppState {
        binding,
        uploader,
        chain_id: config.chain_id.clone(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path =
        env::var("RWA_SERVICE_CONFIG").unwrap_or_else(|_| "service.toml".to_string());
    let config = ServiceConfig::from_file(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;

    let state = Arc::new(build_state(&config)?);
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(
        "RWA storage service for chain {} listening on {}",
        config.chain_id, config.listen
    );
    axum::serve(listener, app).await?;

    Ok(())
}
