//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, delivery, transport produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every HTTP span
//! - Metrics are cheap; nothing is recorded until a recorder is installed

pub mod logging;
pub mod metrics;
