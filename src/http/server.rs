//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Apply the client component to the console
//! - Swap the component on config reload
//! - Close WebSocket sessions on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{BridgeConfig, LoadedConfig};
use crate::host::Console;
use crate::http::handlers::{get_data, get_entries, get_status};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::websocket::ws_handler;
use crate::lifecycle::Shutdown;
use crate::plugin;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<Console>,
    /// Fired once when the server stops; WebSocket sessions subscribe to it.
    pub closing: Shutdown,
}

/// HTTP/WebSocket server for the bridge.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
    state: AppState,
}

impl HttpServer {
    /// Apply the client component and build the router.
    pub fn new(loaded: LoadedConfig) -> Self {
        let LoadedConfig { bridge, client } = loaded;

        let console = Arc::new(Console::new());
        plugin::apply(&console, client, &bridge.console);

        let state = AppState {
            console,
            closing: Shutdown::new(),
        };

        let router = Self::build_router(&bridge, state.clone());
        Self {
            router,
            config: bridge,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(get_status))
            .route("/entries", get(get_entries))
            .route("/data/{service}", get(get_data))
            .route("/ws", get(ws_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// Configs arriving on `config_updates` replace the running component.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<LoadedConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let console = Arc::clone(&self.state.console);
        let running = self.config.clone();
        let mut reload_stop = self.state.closing.subscribe();
        let reloader = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = reload_stop.recv() => break,
                    update = config_updates.recv() => {
                        let Some(update) = update else { break };
                        if update.bridge.server.bind_address != running.server.bind_address
                            || update.bridge.server.request_timeout_secs != running.server.request_timeout_secs
                        {
                            tracing::warn!("Server settings changed; restart required for them to apply");
                        }
                        plugin::reload(&console, update.client, &update.bridge.console);
                    }
                }
            }
        });

        let closing = self.state.closing.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                closing.trigger();
            })
            .await?;

        let _ = reloader.await;
        plugin::dispose(&self.state.console);
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.state.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::delivery::{Data, DataType};
    use crate::http::request::X_REQUEST_ID;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server(plugin: &str) -> HttpServer {
        HttpServer::new(parse_config(&format!("[plugin]\n{plugin}\n")).unwrap())
    }

    async fn get(server: &HttpServer, path: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = server
            .router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, request_id, body.to_vec())
    }

    #[tokio::test]
    async fn test_pull_route() {
        let server = server("selfId = \"bot1\"\ninjectType = \"text\"\nshowText = \"hello\"");

        let (status, request_id, body) = get(&server, "/data/client").await;
        assert_eq!(status, StatusCode::OK);
        assert!(request_id.is_some());

        let data: Data = serde_json::from_slice(&body).unwrap();
        assert_eq!(data.data_type, DataType::Text);
        assert_eq!(data.content, "hello");
    }

    #[tokio::test]
    async fn test_pull_route_passive_is_suppressed() {
        let server = server("selfId = \"bot1\"\npassiveMode = true\ninjectType = \"html\"");

        let (_, _, body) = get(&server, "/data/client").await;
        let data: Data = serde_json::from_slice(&body).unwrap();
        assert_eq!(data, Data::suppressed("bot1"));
    }

    #[tokio::test]
    async fn test_unknown_route_and_service() {
        let server = server("selfId = \"b\"\ninjectType = \"null\"");

        assert_eq!(get(&server, "/data/other").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(&server, "/nope").await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_new_applies_component() {
        let server = server("selfId = \"b\"\npassiveMode = true\ninjectType = \"button\"");
        assert_eq!(server.console().services.len(), 1);
        assert!(server.console().events.has_listener(crate::delivery::DATA_EVENT));
        assert_eq!(server.config().server.request_timeout_secs, 30);
    }
}
