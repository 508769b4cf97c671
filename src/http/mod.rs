//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs   GET /data/{service}  pull path
//!       websocket.rs  GET /ws              push path
//!     → Console (services / events)
//!     → JSON Data to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;
pub mod websocket;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
pub use websocket::{PushReply, PushRequest};
