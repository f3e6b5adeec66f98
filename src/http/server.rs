//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Mount it under the configured route prefix
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::data::{ElementStore, ReloadCoordinator};
use crate::http::random::RandomPicker;
use crate::http::request::{propagate_request_id, set_request_id};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read side of the dataset.
    pub store: Arc<ElementStore>,
    /// Write side of the dataset; publishes into `store`.
    pub coordinator: ReloadCoordinator,
    pub picker: Arc<RandomPicker>,
}

impl AppState {
    pub fn new(coordinator: ReloadCoordinator, picker: RandomPicker) -> Self {
        Self {
            store: coordinator.store().clone(),
            coordinator,
            picker: Arc::new(picker),
        }
    }
}

/// HTTP server for the element API.
pub struct HttpServer {
    router: Router,
    route_prefix: String,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
            route_prefix: config.listener.route_prefix.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let routes = routing::router::app_routes(state);
        routing::prefix::mount(routes, &config.listener.route_prefix)
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id())
    }

    /// The fully layered router, e.g. for driving it in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route_prefix = %self.route_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    metrics::record_request(endpoint, response.status().as_u16(), start);
    response
}
