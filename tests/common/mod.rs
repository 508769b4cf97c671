//! Shared utilities for integration tests.

use std::net::SocketAddr;

use content_bridge::config::{parse_config, LoadedConfig};
use content_bridge::http::{HttpServer, PushReply, PushRequest};
use content_bridge::lifecycle::Shutdown;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// A bridge running on an ephemeral local port.
#[allow(dead_code)]
pub struct TestBridge {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<LoadedConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestBridge {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

/// Build a config file with `plugin` as its `[plugin]` table.
pub fn config_with_plugin(plugin: &str) -> LoadedConfig {
    parse_config(&format!("[plugin]\n{plugin}\n")).unwrap()
}

/// Start a bridge serving `loaded`.
pub async fn start_bridge(loaded: LoadedConfig) -> TestBridge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(loaded);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    TestBridge {
        addr,
        shutdown,
        updates,
        handle,
    }
}

/// Open a WebSocket, send one push request, and return the reply.
#[allow(dead_code)]
pub async fn push_once(ws_url: &str, event: &str) -> PushReply {
    let (mut stream, _) = tokio_tungstenite::connect_async(ws_url).await.unwrap();
    let request = serde_json::to_string(&PushRequest { event: event.to_string() }).unwrap();
    stream.send(Message::Text(request.into())).await.unwrap();

    loop {
        match stream.next().await.expect("socket closed").unwrap() {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            _ => continue,
        }
    }
}
