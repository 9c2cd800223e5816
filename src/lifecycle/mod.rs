//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build remote client → Bind listener → Serve
//!
//! Shutdown:
//!     Ctrl+C / SIGTERM / Shutdown::trigger → Stop accepting → Drain → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: a config error exits before the listener is bound
//! - In-flight remote calls run to completion during drain

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
