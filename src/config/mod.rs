//! Env-driven configuration for the service shell, loaded through dotenvy.
//!
//! Only the shell is configurable; the scoring engines take everything they
//! need as explicit arguments.

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("FLEET_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            environment: AppEnvironment::from_str(&env_or("FLEET_ENV", "development")),
            server: ServerConfig {
                host: env_or("FLEET_HOST", DEFAULT_HOST),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("FLEET_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            },
            store: StoreConfig {
                snapshot_path: env::var("FLEET_SNAPSHOT").ok().map(PathBuf::from),
            },
        })
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Snapshot source for serve mode. When unset, the service answers with the
/// built-in demo dataset until a request supplies its own snapshot.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort { raw: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { raw } => {
                write!(f, "FLEET_PORT '{raw}' is not a valid port number")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "FLEET_HOST must be 'localhost' or an IP address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    // Env vars are process-global; serialize the tests that touch them.
    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_fleet_env() {
        for key in [
            "FLEET_ENV",
            "FLEET_HOST",
            "FLEET_PORT",
            "FLEET_LOG_LEVEL",
            "FLEET_SNAPSHOT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_fleet_env();

        let config = AppConfig::load().expect("defaults load");

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.store.snapshot_path.is_none());
    }

    #[test]
    fn localhost_binds_to_loopback() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_fleet_env();
        env::set_var("FLEET_HOST", "localhost");

        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");

        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn bad_port_is_rejected_with_the_offending_value() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_fleet_env();
        env::set_var("FLEET_PORT", "harbor");

        match AppConfig::load() {
            Err(ConfigError::InvalidPort { raw }) => assert_eq!(raw, "harbor"),
            other => panic!("expected invalid port error, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_path_comes_from_env() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_fleet_env();
        env::set_var("FLEET_SNAPSHOT", "/var/lib/fleet/snapshot.json");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(
            config.store.snapshot_path,
            Some(PathBuf::from("/var/lib/fleet/snapshot.json"))
        );
    }
}
