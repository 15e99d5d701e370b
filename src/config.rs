use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SieveConfig {
    /// Largest N accepted by /generate_sieve.
    pub max_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub sieve: SieveConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://primegrid.db".into());
        let session = SessionConfig {
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
            secure_cookie: std::env::var("SESSION_SECURE_COOKIE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        let max_number = match std::env::var("SIEVE_MAX_NUMBER") {
            Ok(v) => v
                .parse::<u32>()
                .with_context(|| format!("SIEVE_MAX_NUMBER is not a number: {v}"))?,
            Err(_) => 2500,
        };
        Ok(Self {
            database_url,
            session,
            sieve: SieveConfig { max_number },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig {
                ttl_minutes: 60 * 24,
                secure_cookie: false,
            },
            sieve: SieveConfig { max_number: 2500 },
        }
    }
}
