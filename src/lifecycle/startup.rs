//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the initial dataset and publish it
//! - Wire the reload coordinator to both reload triggers
//! - Start background tasks (reload listener, metrics exporter)
//! - Bind the listener and begin accepting traffic

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::data::{DataError, ElementStore, FileLoader, Loader, ReloadCoordinator};
use crate::http::random::RandomPicker;
use crate::http::server::{AppState, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::metrics;

/// Errors that abort startup or the serve loop.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("load elements: {0}")]
    Load(#[source] DataError),

    #[error("bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server: {0}")]
    Serve(#[source] std::io::Error),
}

/// A fully loaded service, ready to be bound to a listener.
pub struct Application {
    config: AppConfig,
    coordinator: ReloadCoordinator,
    reload_tx: mpsc::Sender<()>,
    reload_rx: mpsc::Receiver<()>,
}

impl Application {
    /// Load the initial dataset and set up the store and coordinator.
    ///
    /// An unreadable or malformed data file is fatal. An empty array is
    /// accepted: the service starts and answers queries with a server error
    /// until a reload brings in data.
    pub fn build(config: AppConfig) -> Result<Self, StartupError> {
        let loader = FileLoader::new(&config.data.path);
        let snapshot = loader.load().map_err(StartupError::Load)?;

        if snapshot.is_empty() {
            tracing::warn!(path = %loader.path().display(), "Data file holds no elements");
        }
        tracing::info!(
            path = %loader.path().display(),
            count = snapshot.len(),
            "Elements loaded"
        );

        let store = Arc::new(ElementStore::new(snapshot));
        let coordinator = ReloadCoordinator::new(loader, store);
        let (reload_tx, reload_rx) = mpsc::channel(1);

        Ok(Self {
            config,
            coordinator,
            reload_tx,
            reload_rx,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &ReloadCoordinator {
        &self.coordinator
    }

    /// Sender for process-level reload requests; SIGHUP feeds the same channel.
    pub fn reload_trigger(&self) -> mpsc::Sender<()> {
        self.reload_tx.clone()
    }

    /// Serve on `listener` until `shutdown` is triggered.
    pub async fn serve(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), StartupError> {
        if self.config.observability.metrics_enabled {
            let addr: SocketAddr = self
                .config
                .observability
                .metrics_address
                .parse()
                .map_err(|e| StartupError::Bind {
                    address: self.config.observability.metrics_address.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
                })?;
            metrics::init_metrics(addr)?;
        }
        metrics::record_element_count(self.coordinator.store().get().len());

        #[cfg(unix)]
        if let Err(e) = signals::forward_hangup(self.reload_tx.clone(), shutdown.subscribe()) {
            tracing::warn!(error = %e, "Failed to install SIGHUP handler; signal reloads disabled");
        }
        drop(self.reload_tx);
        tokio::spawn(signals::watch_reload(
            self.coordinator.clone(),
            self.reload_rx,
            shutdown.subscribe(),
        ));

        let state = AppState::new(self.coordinator, RandomPicker::new());
        let server = HttpServer::new(&self.config, state);
        server
            .run(listener, shutdown.subscribe())
            .await
            .map_err(StartupError::Serve)
    }
}

/// Load, bind and serve until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let app = Application::build(config)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_os_signals();

    let address = app.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    app.serve(listener, &shutdown).await
}
