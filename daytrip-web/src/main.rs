use anyhow::{Context, Result};
use clap::Parser;
use daytrip_infrastructure::{ConfigStorage, SecretServiceImpl};
use daytrip_web::cli::Cli;
use daytrip_web::{bootstrap, create_router, logging};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = cli.paths();

    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => paths.logs_dir().context("Failed to resolve log directory")?,
    };
    let _guard = logging::init_tracing(&log_dir)?;

    let config_storage = match &cli.config {
        Some(path) => ConfigStorage::with_path(path),
        None => ConfigStorage::new(&paths)?,
    };
    let mut config = config_storage
        .load()
        .with_context(|| format!("Failed to load {}", config_storage.path().display()))?;
    cli.apply(&mut config);

    let secret_service = SecretServiceImpl::new(&paths).context("Failed to locate secret.json")?;
    let state = bootstrap::bootstrap(&config, &secret_service).await?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("[Startup] Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
