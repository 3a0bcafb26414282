use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24;
/// One year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    /// Root directory of the protected download.
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://users.db".into());
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")
                .map_err(|_| anyhow::anyhow!("SESSION_SECRET must be set"))?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "secrets-site".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "secrets-site-users".into()),
            ttl_minutes: parse_ttl_minutes(
                std::env::var("SESSION_TTL_MINUTES").ok().as_deref(),
            )?,
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));
        Ok(Self {
            database_url,
            session,
            static_dir,
        })
    }
}

fn parse_ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_TTL_MINUTES);
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if (1..=MAX_SESSION_TTL_MINUTES).contains(&v) => Ok(v),
        _ => anyhow::bail!(
            "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {raw:?}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_when_unset() {
        assert_eq!(parse_ttl_minutes(None).unwrap(), DEFAULT_SESSION_TTL_MINUTES);
    }

    #[test]
    fn ttl_accepts_values_in_range() {
        assert_eq!(parse_ttl_minutes(Some("30")).unwrap(), 30);
        assert_eq!(
            parse_ttl_minutes(Some(&MAX_SESSION_TTL_MINUTES.to_string())).unwrap(),
            MAX_SESSION_TTL_MINUTES
        );
    }

    #[test]
    fn ttl_rejects_out_of_range_and_garbage() {
        let max = i64::MAX.to_string();
        for raw in ["0", "-5", "6000000000", max.as_str(), "soon", ""] {
            let err = parse_ttl_minutes(Some(raw)).unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_MINUTES"), "{raw}");
        }
    }
}
