//! Prometheus export, in its own test binary: the recorder is process-global.

use std::time::Duration;

use random_api::{AppConfig, Application, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_element_gauge_exported_from_startup() {
    let metrics_addr = "127.0.0.1:29190";

    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("data.json");
    std::fs::write(&data_path, "[1,2,3]").unwrap();

    let mut config = AppConfig::default();
    config.data.path = data_path;
    config.observability.metrics_enabled = true;
    config.observability.metrics_address = metrics_addr.into();

    let app = Application::build(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    tokio::spawn(async move { app.serve(listener, &server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut exported = String::new();
    for _ in 0..50 {
        if let Ok(res) = client.get(format!("http://{metrics_addr}/metrics")).send().await {
            exported = res.text().await.unwrap();
            if exported.contains("randomapi_elements") {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert!(
        exported.lines().any(|line| {
            line.strip_prefix("randomapi_elements ")
                .and_then(|value| value.trim().parse::<f64>().ok())
                == Some(3.0)
        }),
        "gauge missing from export:\n{exported}"
    );

    shutdown.trigger();
}
