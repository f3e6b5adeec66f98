//! Shared utilities for integration testing.

use std::path::PathBuf;
use std::time::Duration;

use random_api::lifecycle::StartupError;
use random_api::{AppConfig, Application, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A running service on an ephemeral port, backed by a temporary data file.
pub struct TestServer {
    pub base_url: String,
    pub data_path: PathBuf,
    pub shutdown: Shutdown,
    /// Same channel SIGHUP feeds.
    pub reload_signal: mpsc::Sender<()>,
    pub handle: JoinHandle<Result<(), StartupError>>,
    pub client: reqwest::Client,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start(route_prefix: &str, data: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("data.json");
        std::fs::write(&data_path, data).unwrap();

        let mut config = AppConfig::default();
        config.data.path = data_path.clone();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.listener.route_prefix = route_prefix.into();

        let app = Application::build(config).unwrap();
        let reload_signal = app.reload_trigger();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.clone();
        let handle = tokio::spawn(async move { app.serve(listener, &server_shutdown).await });

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .unwrap();

        Self {
            base_url: format!("http://{}{}", addr, route_prefix),
            data_path,
            shutdown,
            reload_signal,
            handle,
            client,
            _dir: dir,
        }
    }

    pub fn write_data(&self, data: &str) {
        std::fs::write(&self.data_path, data).unwrap();
    }

    pub async fn get(&self, path: &str) -> (u16, String) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("server unreachable");
        (res.status().as_u16(), res.text().await.unwrap())
    }

    pub async fn post(&self, path: &str) -> (u16, String) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("server unreachable");
        (res.status().as_u16(), res.text().await.unwrap())
    }

    /// Poll `path` until its body equals `expected` or the deadline passes.
    #[allow(dead_code)]
    pub async fn wait_for_body(&self, path: &str, expected: &str) -> bool {
        for _ in 0..100 {
            if self.get(path).await.1 == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}
