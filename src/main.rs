//! content-bridge server.
//!
//! Serves one configured piece of content to a frontend panel, either on
//! demand (pull) or on a push request, depending on `passiveMode`.
//!
//! # Architecture Overview
//!
//! ```text
//!   content-bridge.toml
//!          │
//!          ▼
//!   ┌──────────────┐     ┌────────────────┐     ┌──────────────────────────┐
//!   │    config    │────▶│     plugin     │────▶│         Console          │
//!   │ load+validate│     │ apply/dispose  │     │ services │ events │entry │
//!   └──────────────┘     └────────────────┘     └────┬──────────┬──────────┘
//!          ▲                                         │          │
//!          │ watch_config                     GET /data/client  │ /ws {"event":"client/data"}
//!   ┌──────────────┐                                 ▼          ▼
//!   │   watcher    │                         ┌──────────────────────────┐
//!   └──────────────┘                         │     DeliveryService      │
//!                                            │ retrieve │ on_data_request│
//!                                            └──────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use content_bridge::config::{load_config, ConfigWatcher};
use content_bridge::http::HttpServer;
use content_bridge::lifecycle::{signals, Shutdown};
use content_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "content-bridge")]
#[command(about = "Serve configured content to a frontend panel by pull or push", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "content-bridge.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Startup aborts on an invalid config; log at the default level until it is known.
    let loaded = match load_config(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            logging::init("info");
            tracing::error!(path = ?args.config, error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    logging::init(&loaded.bridge.observability.log_level);
    tracing::info!("content-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %loaded.bridge.server.bind_address,
        self_id = %loaded.client.self_id,
        inject_type = %loaded.client.inject_type(),
        passive_mode = loaded.client.passive_mode,
        "Configuration loaded"
    );

    if loaded.bridge.observability.metrics_enabled {
        match loaded.bridge.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %loaded.bridge.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = if loaded.bridge.server.watch_config {
        let (watcher, updates) = ConfigWatcher::new(&args.config);
        (updates, Some(watcher.run()?))
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (updates, None)
    };

    let listener = TcpListener::bind(&loaded.bridge.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(loaded);
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
