use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::{
    config::Config,
    services::{CartManager, ProductManager},
    storage::{FileStore, JsonFileStore},
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Products and carts over JSON documents, with image thumbnails")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("storefront={},tower_http=trace", cli.log_level)
    } else {
        format!("storefront={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let json_store = JsonFileStore::new(
        config.storage.files_path.clone(),
        config.storage.images_path.clone(),
    );
    json_store.ensure_storage_dirs().await?;
    tokio::fs::create_dir_all(&config.storage.public_path).await?;
    info!(
        "Storage ready: documents in {}, images in {}",
        config.storage.files_path.display(),
        config.storage.images_path.display()
    );

    let store: Arc<dyn FileStore> = Arc::new(json_store);
    let products = ProductManager::new(store.clone());
    let carts = CartManager::new(store.clone(), products.clone());

    if products.collection().ensure().await? {
        info!("Seeded empty {}", products.collection().name());
    }
    if carts.collection().ensure().await? {
        info!("Seeded empty {}", carts.collection().name());
    }

    let web_server = WebServer::new(config, store, products, carts)?;
    info!(
        "Web server starting on http://{}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    info!("Storefront stopped");
    Ok(())
}
