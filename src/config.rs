use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: require_secret(std::env::var("JWT_SECRET").ok())?,
            ttl_days: parse_ttl_days(std::env::var("JWT_TTL_DAYS").ok())?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3333);
        Ok(Self {
            database_url,
            host,
            port,
            jwt,
        })
    }
}

/// Tokens signed with an empty key are forgeable, so refuse to start without one.
fn require_secret(raw: Option<String>) -> anyhow::Result<String> {
    match raw {
        Some(secret) if !secret.trim().is_empty() => Ok(secret),
        _ => anyhow::bail!("JWT_SECRET must be set to a non-empty value"),
    }
}

const TTL_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

fn parse_ttl_days(raw: Option<String>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(7);
    };
    let days = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_DAYS is not a number: {raw:?}"))?;
    if !TTL_DAYS_RANGE.contains(&days) {
        anyhow::bail!(
            "JWT_TTL_DAYS must be between {} and {}, got {days}",
            TTL_DAYS_RANGE.start(),
            TTL_DAYS_RANGE.end()
        );
    }
    Ok(days)
}
