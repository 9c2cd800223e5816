//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, remote client, lifecycle
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt subscriber)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Request ID is attached to every request span

pub mod logging;

pub use logging::init_logging;
