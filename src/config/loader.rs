//! Configuration loading from disk and flags.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::args::Args;
use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::prefix::normalize_route_prefix;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "IO error reading {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Read a TOML file into a configuration, without validating it.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Merge defaults, the optional config file and the flags into a validated
/// configuration.
pub fn resolve(args: Args) -> Result<AppConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    args.apply(&mut config);

    config.listener.route_prefix = normalize_route_prefix(&config.listener.route_prefix);
    config.listener.bind_address = normalize_listen_address(&config.listener.bind_address);
    config.observability.metrics_address =
        normalize_listen_address(&config.observability.metrics_address);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Expand a bare `:port` to `0.0.0.0:port`; other forms pass through.
pub fn normalize_listen_address(address: &str) -> String {
    let address = address.trim();
    match address.strip_prefix(':') {
        Some(port) if !port.contains(':') => format!("0.0.0.0:{port}"),
        _ => address.to_string(),
    }
}
