//! Lock-free holder of the currently published snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::data::element::Snapshot;

/// Holds the current snapshot for lock-free reads.
///
/// Readers get an `Arc` to a complete snapshot; a concurrent `set` never
/// mutates it, so a reader may keep using what it loaded for as long as it
/// likes. Writers replace the whole snapshot in one atomic swap.
#[derive(Debug)]
pub struct ElementStore {
    current: ArcSwap<Snapshot>,
}

impl ElementStore {
    /// Create a store that publishes `snapshot` from the start.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// The most recently published snapshot.
    pub fn get(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Publish `snapshot`; every `get` that starts after this returns it.
    pub fn set(&self, snapshot: Snapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

impl Default for ElementStore {
    /// A store nothing was ever published to; reads see an empty snapshot.
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
