/// Configuration management for the consultation video service
use crate::{
    db::postgres::PostgresConfig,
    error::{VideoError, VideoResult},
    grant::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, MIN_TOKEN_TTL_SECS},
};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub livekit: LiveKitConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

/// Where identities are read from
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Local SQLite database with its own `users` table
    Sqlite { location: PathBuf },
    /// CMS PostgreSQL database
    Postgres(PostgresConfig),
}

/// LiveKit signing configuration
#[derive(Clone)]
pub struct LiveKitConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Grant lifetime in seconds
    pub token_ttl: u64,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> VideoResult<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> VideoResult<Self> {
        let hostname = lookup("VIDEO_HOSTNAME").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("VIDEO_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| VideoError::Configuration("Invalid port number".to_string()))?;
        let cors_origins = lookup("VIDEO_CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(database_url) => {
                StorageConfig::Postgres(PostgresConfig::new(database_url).with_overrides(&lookup))
            }
            None => StorageConfig::Sqlite {
                location: lookup("VIDEO_USER_DB_LOCATION")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./data/users.sqlite")),
            },
        };

        let api_key = lookup("LIVEKIT_API_KEY")
            .ok_or_else(|| VideoError::Configuration("LIVEKIT_API_KEY is required".to_string()))?;
        let api_secret = lookup("LIVEKIT_API_SECRET").ok_or_else(|| {
            VideoError::Configuration("LIVEKIT_API_SECRET is required".to_string())
        })?;
        let token_ttl = match lookup("LIVEKIT_TOKEN_TTL") {
            Some(raw) => raw.parse().map_err(|_| {
                VideoError::Configuration(format!("Invalid LIVEKIT_TOKEN_TTL: {}", raw))
            })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let level = lookup("RUST_LOG")
            .unwrap_or_else(|| "consult_video=debug,tower_http=debug".to_string());
        let format = match lookup("VIDEO_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                cors_origins,
            },
            storage,
            livekit: LiveKitConfig {
                api_key,
                api_secret,
                token_ttl,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> VideoResult<()> {
        if self.service.hostname.is_empty() {
            return Err(VideoError::Configuration("Hostname cannot be empty".to_string()));
        }

        if self.livekit.api_key.trim().is_empty() {
            return Err(VideoError::Configuration("LiveKit API key cannot be empty".to_string()));
        }

        if self.livekit.api_secret.len() < 32 {
            return Err(VideoError::Configuration(
                "LiveKit API secret must be at least 32 characters".to_string(),
            ));
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.livekit.token_ttl) {
            return Err(VideoError::Configuration(format!(
                "LiveKit token TTL must be between {} and {} seconds",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS
            )));
        }

        if let Some(origin) = self
            .service
            .cors_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(VideoError::Configuration(format!("Invalid CORS origin: {}", origin)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> VideoResult<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("LIVEKIT_API_KEY", "APIkey"), ("LIVEKIT_API_SECRET", SECRET)]).unwrap();

        assert_eq!(config.service.port, 8080);
        assert_eq!(config.livekit.token_ttl, DEFAULT_TOKEN_TTL_SECS);
        assert!(config.service.cors_origins.is_empty());
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(matches!(config.storage, StorageConfig::Sqlite { .. }));
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = load(&[("LIVEKIT_API_SECRET", SECRET)]).unwrap_err();
        assert!(matches!(err, VideoError::Configuration(_)));

        let err = load(&[("LIVEKIT_API_KEY", "APIkey")]).unwrap_err();
        assert!(matches!(err, VideoError::Configuration(_)));
    }

    #[test]
    fn test_short_secret_fails_validation() {
        let config = load(&[("LIVEKIT_API_KEY", "APIkey"), ("LIVEKIT_API_SECRET", "short")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_bounds() {
        let config = load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("LIVEKIT_TOKEN_TTL", "5"),
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let config = load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("LIVEKIT_TOKEN_TTL", "900"),
        ])
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.livekit.token_ttl, 900);

        assert!(load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("LIVEKIT_TOKEN_TTL", "forever"),
        ])
        .is_err());
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("DATABASE_URL", "postgresql://localhost/astro"),
        ])
        .unwrap();

        match config.storage {
            StorageConfig::Postgres(pg) => assert_eq!(pg.database_url, "postgresql://localhost/astro"),
            other => panic!("expected postgres storage, got {:?}", other),
        }
    }

    #[test]
    fn test_cors_origins() {
        let config = load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("VIDEO_CORS_ORIGINS", "https://astro.example, http://localhost:3000"),
        ])
        .unwrap();
        assert_eq!(
            config.service.cors_origins,
            vec!["https://astro.example", "http://localhost:3000"]
        );
        config.validate().unwrap();

        let config = load(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("VIDEO_CORS_ORIGINS", "astro.example"),
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&[("LIVEKIT_API_KEY", "APIkey"), ("LIVEKIT_API_SECRET", SECRET)]).unwrap();
        assert!(!format!("{:?}", config).contains(SECRET));
    }
}
