//! Command-line flags.
//!
//! Every flag can also be set through a `RANDOMAPI_*` environment variable.
//! Flags override values from the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::{AppConfig, LogFormat};

#[derive(Debug, Default, Parser)]
#[command(name = "random-api", version)]
#[command(about = "Serve random or indexed elements of a JSON array over HTTP", long_about = None)]
pub struct Args {
    /// Optional TOML configuration file.
    #[arg(long, env = "RANDOMAPI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path prefix to mount the app (e.g., /random-api). Empty = root.
    #[arg(long, env = "RANDOMAPI_ROUTE_PREFIX", value_name = "PATH")]
    pub route_prefix: Option<String>,

    /// HTTP server listen address.
    #[arg(long, env = "RANDOMAPI_LISTEN_ADDRESS", value_name = "ADDR:PORT")]
    pub listen_address: Option<String>,

    /// Path to JSON file with elements.
    #[arg(long, env = "RANDOMAPI_DATA_PATH", value_name = "PATH")]
    pub data_path: Option<PathBuf>,

    /// Log format.
    #[arg(short = 'l', long, env = "RANDOMAPI_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(prefix) = self.route_prefix {
            config.listener.route_prefix = prefix;
        }
        if let Some(address) = self.listen_address {
            config.listener.bind_address = address;
        }
        if let Some(path) = self.data_path {
            config.data.path = path;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}
