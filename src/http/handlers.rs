//! Pull-path and introspection handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::host::Entry;
use crate::http::request::request_id;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub services: Vec<String>,
    pub events: Vec<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let mut services = state.console.services.names();
    let mut events = state.console.events.events();
    services.sort();
    events.sort();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        services,
        events,
    })
}

pub async fn get_entries(State(state): State<AppState>) -> Json<Vec<Entry>> {
    Json(state.console.entries())
}

/// `GET /data/{service}`: pull the current payload of a data service.
pub async fn get_data(
    State(state): State<AppState>,
    Path(service): Path<String>,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);

    let Some(provider) = state.console.services.get(&service) else {
        tracing::warn!(request_id = %request_id, service = %service, "Unknown data service");
        return (StatusCode::NOT_FOUND, "Unknown data service").into_response();
    };

    let data = provider.get().await;
    tracing::debug!(request_id = %request_id, service = %service, data_type = %data.data_type, "Served pull request");
    (StatusCode::OK, Json(data)).into_response()
}
