//! TOML configuration for the rankqueue service.
//!
//! Every section has compiled-in defaults, so an empty file (or no file at
//! all) yields a working configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "RANKQUEUE_CONFIG";

/// Standard system location for the config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/rankqueue/rankqueue.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for the rankqueue process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded rankqueue configuration");
        Ok(config)
    }

    /// Resolve configuration from, in order:
    /// 1. `explicit`, when given (errors are returned, not swallowed).
    /// 2. The path in `RANKQUEUE_CONFIG`.
    /// 3. `/etc/rankqueue/rankqueue.toml`.
    /// 4. Compiled-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        Ok(Self::load_or_default())
    }

    /// Steps 2-4 of [`ServiceConfig::resolve`]; never fails. A candidate
    /// that fails to load is logged and the next one is tried.
    pub fn load_or_default() -> Self {
        for path in Self::candidate_paths() {
            match Self::load(&path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unusable config file");
                }
            }
        }

        debug!("no config file found, using compiled-in defaults");
        Self::default()
    }

    /// The env-named file (tried even if missing, so typos get logged),
    /// then the system file when it exists.
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .into_iter()
            .collect();

        let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
        if system_path.exists() {
            paths.push(system_path);
        }
        paths
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address and port the HTTP API binds to.
    pub listen_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8080".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum tracing level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listens_on_8080_with_pretty_logs() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.server.listen_address, "0.0.0.0:8080");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_json_logging_and_custom_bind() {
        let toml_str = r#"
[server]
listen_address = "127.0.0.1:9000"

[logging]
level = "debug"
format = "json"
"#;

        let cfg: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.listen_address, "127.0.0.1:9000");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_logging_only_section_keeps_server_defaults() {
        let toml_str = r#"
[logging]
level = "warn"
"#;

        let cfg: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert_eq!(cfg.server.listen_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_file_is_default_service() {
        let cfg: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(
            cfg.server.listen_address,
            ServiceConfig::default().server.listen_address
        );
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result: std::result::Result<ServiceConfig, _> =
            toml::from_str("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rankqueue.toml");
        std::fs::write(
            &path,
            r#"
[server]
listen_address = "0.0.0.0:9999"
"#,
        )
        .unwrap();

        let cfg = ServiceConfig::load(&path).unwrap();
        assert_eq!(cfg.server.listen_address, "0.0.0.0:9999");

        let resolved = ServiceConfig::resolve(Some(&path)).unwrap();
        assert_eq!(resolved.server.listen_address, "0.0.0.0:9999");
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let missing = Path::new("/nonexistent/path/rankqueue.toml");
        assert!(ServiceConfig::load(missing).is_err());
        assert!(ServiceConfig::resolve(Some(missing)).is_err());
    }

    #[test]
    fn test_env_var_selects_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("from-env.toml");
        std::fs::write(&path, "[server]\nlisten_address = \"127.0.0.1:7070\"\n").unwrap();

        // Sole test that sets RANKQUEUE_CONFIG.
        std::env::set_var(CONFIG_ENV, &path);
        let from_env = ServiceConfig::resolve(None).unwrap();

        std::env::set_var(CONFIG_ENV, dir.path().join("missing.toml"));
        let candidates = ServiceConfig::candidate_paths();
        let fallback = ServiceConfig::load_or_default();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(from_env.server.listen_address, "127.0.0.1:7070");
        assert_eq!(candidates[0], dir.path().join("missing.toml"));
        // An unreadable env file is skipped rather than fatal.
        assert_ne!(fallback.server.listen_address, "127.0.0.1:7070");
    }
}
