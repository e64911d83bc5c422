/// Application context and dependency injection
use crate::{
    config::{ServerConfig, StorageConfig},
    db,
    error::{VideoError, VideoResult},
    grant::{GrantIssuer, GrantSigningKey},
    identity::{IdentityResolver, PostgresIdentityStore, SqliteIdentityStore},
};
use chrono::Duration;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub grant_issuer: Arc<GrantIssuer>,
}

impl AppContext {
    /// Create a new application context
    pub async fn new(config: ServerConfig) -> VideoResult<Self> {
        // Fail before any pool is opened
        config.validate()?;

        let identity_resolver: Arc<dyn IdentityResolver> = match &config.storage {
            StorageConfig::Sqlite { location } => {
                tracing::info!("Using SQLite identity store at {:?}", location);
                let pool = db::create_pool(location, db::DatabaseOptions::default()).await?;
                db::run_migrations(&pool).await?;
                db::test_connection(&pool).await?;
                Arc::new(SqliteIdentityStore::new(pool))
            }
            StorageConfig::Postgres(pg_config) => {
                let pool = db::postgres::create_pool(pg_config).await?;
                Arc::new(PostgresIdentityStore::new(pool))
            }
        };

        Self::with_resolver(config, identity_resolver)
    }

    /// Build a context around an already constructed identity store
    pub fn with_resolver(
        config: ServerConfig,
        identity_resolver: Arc<dyn IdentityResolver>,
    ) -> VideoResult<Self> {
        config.validate()?;

        let key = GrantSigningKey::new(&config.livekit.api_key, &config.livekit.api_secret)?;
        let ttl = token_ttl(config.livekit.token_ttl)?;
        let grant_issuer = Arc::new(GrantIssuer::new(identity_resolver, key, ttl));

        Ok(Self {
            config: Arc::new(config),
            grant_issuer,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.service.hostname, self.config.service.port)
    }
}

fn token_ttl(secs: u64) -> VideoResult<Duration> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| VideoError::Configuration(format!("LiveKit token TTL out of range: {}", secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    struct NoUsers;

    #[async_trait]
    impl IdentityResolver for NoUsers {
        async fn resolve(&self, id: i64) -> VideoResult<Identity> {
            Err(VideoError::UserNotFound { id })
        }
    }

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    fn build(vars: &[(&str, &str)]) -> VideoResult<AppContext> {
        AppContext::with_resolver(config(vars), Arc::new(NoUsers))
    }

    #[test]
    fn test_with_resolver_accepts_valid_config() {
        let ctx = build(&[
            ("LIVEKIT_API_KEY", "APIkey"),
            ("LIVEKIT_API_SECRET", SECRET),
            ("LIVEKIT_TOKEN_TTL", "900"),
        ])
        .unwrap();

        assert_eq!(ctx.grant_issuer.signing_key().api_key(), "APIkey");
        assert_eq!(ctx.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_with_resolver_rejects_short_secret() {
        let err = build(&[("LIVEKIT_API_KEY", "APIkey"), ("LIVEKIT_API_SECRET", "short")])
            .err()
            .unwrap();
        assert!(matches!(err, VideoError::Configuration(_)));
    }

    #[test]
    fn test_with_resolver_rejects_ttl_out_of_bounds() {
        for ttl in ["5", "18446744073709551"] {
            let err = build(&[
                ("LIVEKIT_API_KEY", "APIkey"),
                ("LIVEKIT_API_SECRET", SECRET),
                ("LIVEKIT_TOKEN_TTL", ttl),
            ])
            .err()
            .unwrap();
            assert!(matches!(err, VideoError::Configuration(_)), "ttl {}", ttl);
        }
    }

    #[test]
    fn test_token_ttl_conversion() {
        assert_eq!(token_ttl(3600).unwrap(), Duration::hours(1));
        assert!(matches!(token_ttl(u64::MAX), Err(VideoError::Configuration(_))));
        assert!(matches!(token_ttl(18446744073709551), Err(VideoError::Configuration(_))));
    }
}
