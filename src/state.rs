use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{path::PathBuf, sync::Arc};

    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

    use super::AppState;
    use crate::config::{AppConfig, SessionConfig};

    pub fn test_config(secret: &str) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig {
                secret: secret.into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                cookie_secure: false,
            },
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        }
    }

    /// Fresh in-memory database with the schema applied.
    ///
    /// A single connection that never expires, so every query sees the same
    /// in-memory database.
    pub async fn test_state() -> AppState {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("migrations apply");
        AppState::from_parts(db, Arc::new(test_config("test-secret")))
    }

    pub async fn count_users_with_email(db: &SqlitePool, email: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?1")
            .bind(email)
            .fetch_one(db)
            .await
            .expect("count users")
    }
}
