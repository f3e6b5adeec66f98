//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → command-line flags / RANDOMAPI_* env vars (args.rs)
//!     → route prefix normalisation
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the dataset is hot-reloaded
//! - All fields have defaults to allow running with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use loader::{load_config, resolve, ConfigError};
pub use schema::{AppConfig, DataConfig, ListenerConfig, LogFormat, ObservabilityConfig, TimeoutConfig};
