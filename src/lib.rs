//! Random element API library.
//!
//! Serves the elements of a JSON array: a random one, one by index, and a
//! reload of the backing file without dropping traffic.

pub mod config;
pub mod data;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use data::{ElementStore, ReloadCoordinator};
pub use http::HttpServer;
pub use lifecycle::{Application, Shutdown};
