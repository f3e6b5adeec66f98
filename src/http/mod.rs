//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing (verb + path → handler, optional prefix)
//!     → handlers.rs (read the current snapshot, or trigger a reload)
//!     → response.rs (element bytes, or status + fixed message)
//! ```

pub mod handlers;
pub mod random;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
