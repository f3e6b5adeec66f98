//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → prefix.rs (strip the optional mount prefix)
//!     → router.rs (verb + path → handler)
//!     → No match: 404, wrong verb: 405
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at startup, immutable at runtime
//! - The prefix is normalised once, at config time

pub mod prefix;
pub mod router;
