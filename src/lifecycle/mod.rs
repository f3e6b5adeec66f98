//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load data → Publish snapshot → Start reload listener → Start listener
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGHUP → reload channel → ReloadCoordinator
//! ```
//!
//! # Design Decisions
//! - Fail fast: a data file that cannot be read or parsed at startup is fatal
//! - Listeners start last (traffic only when data is loaded)
//! - Reloads are never fatal; the last good data keeps being served

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{run, Application, StartupError};
