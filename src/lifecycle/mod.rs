//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Apply component → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Close sessions → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an invalid client config aborts startup
//! - Listener starts last (traffic only when the component is applied)

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
