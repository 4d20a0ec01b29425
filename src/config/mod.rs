// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, IdStrategy};

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables prefixed with `MOVIES__`
    /// override it, e.g. `MOVIES__SERVER__PORT=8080`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MOVIES")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "movies-crud")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("store.id_strategy", "length")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/movies").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.store.id_strategy, IdStrategy::Length);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist/movies").unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 8080;
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:8080");

        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_id_strategy_from_str() {
        let store: types::StoreConfig =
            serde_json::from_str(r#"{"id_strategy":"sequence"}"#).unwrap();
        assert_eq!(store.id_strategy, IdStrategy::Sequence);

        let store: types::StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(store.id_strategy, IdStrategy::Length);
    }
}
