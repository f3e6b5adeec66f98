//! Dataset subsystem.
//!
//! # Data Flow
//! ```text
//! data file (JSON array)
//!     → loader.rs (read & split into opaque elements)
//!     → reload.rs (serialize attempts, reject empty datasets)
//!     → store.rs (atomic swap of Arc<Snapshot>)
//!     → http handlers read the current snapshot
//!
//! On reload trigger (HTTP or SIGHUP):
//!     reload.rs acquires the gate
//!     → loader.rs re-reads the whole file
//!     → store.rs publishes only if the result is non-empty
//! ```
//!
//! # Design Decisions
//! - Elements are never decoded; their bytes are echoed back verbatim
//! - Snapshots are immutable once built; a reload replaces the whole snapshot
//! - Readers never take a lock; only reload attempts are serialized
//! - A failed reload leaves the last good snapshot in place

pub mod element;
pub mod error;
pub mod loader;
pub mod reload;
pub mod store;

pub use element::{Element, Snapshot};
pub use error::DataError;
pub use loader::{FileLoader, Loader};
pub use reload::ReloadCoordinator;
pub use store::ElementStore;
