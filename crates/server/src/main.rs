//! pwapack server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use pwapack_core::AppConfig;
use pwapack_server::{create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pwapack - wrap an uploaded static site into an installable PWA
#[derive(Parser, Debug)]
#[command(name = "pwapackd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "PWAPACK_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("pwapack v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("PWAPACK_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // The work root must exist before the first workspace is allocated
    // under it.
    tokio::fs::create_dir_all(&config.work.root)
        .await
        .with_context(|| format!("failed to create work root {}", config.work.root.display()))?;
    tracing::info!(work_root = %config.work.root.display(), "Work root ready");

    let bind = config.server.bind.clone();
    let state = AppState::new(config);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(%bind, "Server listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
