use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Fresh in-memory database with the schema applied.
    #[cfg(test)]
    pub async fn fake() -> Self {
        let config = Arc::new(AppConfig::default());
        let db = db::connect(&config.database_url)
            .await
            .expect("in-memory pool ok");
        db::migrate(&db).await.expect("migrations ok");
        Self::from_parts(db, config)
    }
}
