//! Serialized reloads of the dataset.
//!
//! # Responsibilities
//! - Allow at most one reload at a time, whoever triggered it
//! - Re-read the data file through the configured loader
//! - Publish only non-empty snapshots; leave the store untouched otherwise
//!
//! # Design Decisions
//! - The gate is a fair async mutex: queued reloads run one after another,
//!   first come first served, none is coalesced or rejected
//! - Each reload runs on its own task, so a caller that goes away (e.g. a
//!   client disconnecting from `/-/reload`) cannot abandon it halfway
//! - File I/O happens on the blocking pool; readers never wait on it

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::data::error::DataError;
use crate::data::loader::Loader;
use crate::data::store::ElementStore;
use crate::observability::metrics;

/// The single serialization point for dataset reloads.
///
/// Cloning is cheap and every clone shares the same gate.
#[derive(Clone)]
pub struct ReloadCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    gate: Mutex<()>,
    loader: Arc<dyn Loader>,
    store: Arc<ElementStore>,
}

impl ReloadCoordinator {
    pub fn new(loader: impl Loader, store: Arc<ElementStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                gate: Mutex::new(()),
                loader: Arc::new(loader),
                store,
            }),
        }
    }

    /// The store this coordinator publishes to.
    pub fn store(&self) -> &Arc<ElementStore> {
        &self.inner.store
    }

    /// Reload the dataset and publish it.
    ///
    /// Waits for any reload already in progress. On success returns the
    /// number of elements now being served. On failure the previously
    /// published snapshot stays in place and the loader's error is returned
    /// unchanged.
    pub async fn reload(&self) -> Result<usize, DataError> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.reload_exclusive().await })
            .await
            .map_err(|e| DataError::Interrupted(e.to_string()))?
    }

    async fn reload_exclusive(&self) -> Result<usize, DataError> {
        let _gate = self.inner.gate.lock().await;

        let result = self.load_and_publish().await;
        match &result {
            Ok(count) => {
                tracing::info!(count = *count, "reloading data");
                metrics::record_reload(true);
                metrics::record_element_count(*count);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload data. Keeping current elements.");
                metrics::record_reload(false);
            }
        }
        result
    }

    async fn load_and_publish(&self) -> Result<usize, DataError> {
        let loader = self.inner.loader.clone();
        let snapshot = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| DataError::Interrupted(e.to_string()))??;

        if snapshot.is_empty() {
            return Err(DataError::Empty);
        }

        let count = snapshot.len();
        self.inner.store.set(snapshot);
        Ok(count)
    }
}

impl std::fmt::Debug for ReloadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadCoordinator")
            .field("elements", &self.inner.store.get().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::element::Snapshot;
    use crate::data::loader::FileLoader;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn old_store() -> Arc<ElementStore> {
        Arc::new(ElementStore::new(Snapshot::from_json_fragments(&[r#""old""#])))
    }

    #[tokio::test]
    async fn test_reload_publishes_new_elements() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"["first","second"]"#);
        let store = old_store();

        let coordinator = ReloadCoordinator::new(FileLoader::new(path), store.clone());
        assert_eq!(coordinator.reload().await.unwrap(), 2);

        assert_eq!(
            *store.get(),
            Snapshot::from_json_fragments(&[r#""first""#, r#""second""#])
        );
    }

    #[tokio::test]
    async fn test_empty_array_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[]");
        let store = old_store();
        let before = store.get();

        let coordinator = ReloadCoordinator::new(FileLoader::new(path), store.clone());
        let err = coordinator.reload().await.unwrap_err();

        assert!(matches!(err, DataError::Empty));
        assert_eq!(err.to_string(), "no elements available");
        assert_eq!(store.get(), before);
    }

    #[tokio::test]
    async fn test_failed_reloads_keep_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[1,2,3]");
        let store = old_store();
        let coordinator = ReloadCoordinator::new(FileLoader::new(&path), store.clone());
        coordinator.reload().await.unwrap();
        let good = store.get();

        std::fs::write(&path, r#"{"not":"an array"}"#).unwrap();
        assert!(matches!(coordinator.reload().await, Err(DataError::Parse { .. })));
        assert_eq!(*store.get(), *good);

        std::fs::write(&path, "[1,2").unwrap();
        assert!(matches!(coordinator.reload().await, Err(DataError::Parse { .. })));
        assert_eq!(*store.get(), *good);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(coordinator.reload().await, Err(DataError::Read { .. })));
        assert_eq!(*store.get(), *good);
    }

    /// Loader that records how many loads overlap.
    struct SlowLoader {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl Loader for SlowLoader {
        fn load(&self) -> Result<Snapshot, DataError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

            std::thread::sleep(Duration::from_millis(20));

            self.active.fetch_sub(1, Ordering::SeqCst);
            let fragments = vec!["0"; call];
            Ok(Snapshot::from_json_fragments(&fragments))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reloads_are_serialized() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let store = old_store();
        let coordinator = ReloadCoordinator::new(
            SlowLoader {
                active: active.clone(),
                peak: peak.clone(),
                calls: calls.clone(),
            },
            store.clone(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let coordinator = coordinator.clone();
                tokio::spawn(async move { coordinator.reload().await })
            })
            .collect();

        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 8);
        assert_eq!(peak.load(Ordering::SeqCst), 1, "reloads overlapped");
        counts.sort_unstable();
        assert_eq!(counts, (1..=8).collect::<Vec<_>>());
        // The last reload through the gate wins.
        assert_eq!(store.get().len(), 8);
    }

    /// Loader that blocks until the test releases it.
    struct HeldLoader {
        release: std::sync::Mutex<mpsc::Receiver<()>>,
    }

    impl Loader for HeldLoader {
        fn load(&self) -> Result<Snapshot, DataError> {
            let _ = self.release.lock().unwrap().recv();
            Ok(Snapshot::from_json_fragments(&[r#""new""#]))
        }
    }

    #[tokio::test]
    async fn test_dropped_caller_does_not_abort_reload() {
        let (tx, rx) = mpsc::channel();
        let store = old_store();
        let coordinator = ReloadCoordinator::new(
            HeldLoader {
                release: std::sync::Mutex::new(rx),
            },
            store.clone(),
        );

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), coordinator.reload()).await;
        assert!(abandoned.is_err());
        assert_eq!(store.get()[0].as_bytes(), br#""old""#);

        tx.send(()).unwrap();
        for _ in 0..100 {
            if store.get()[0].as_bytes() == br#""new""# {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("abandoned reload never published");
    }
}
