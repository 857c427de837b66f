use anyhow::Context;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::{auth::claims::Claims, config::JwtConfig, users::repo_types::User};

/// Signing and verification keys, built once from config at startup.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// A freshly signed token together with the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

impl IssuedToken {
    /// Expiry as a unix timestamp in milliseconds.
    pub fn expires_at_millis(&self) -> i64 {
        (self.expires_at.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(&cfg.secret, Duration::days(cfg.ttl_days))
    }

    pub fn sign(&self, user: &User) -> anyhow::Result<IssuedToken> {
        self.sign_at(user, OffsetDateTime::now_utc())
    }

    pub(crate) fn sign_at(&self, user: &User, now: OffsetDateTime) -> anyhow::Result<IssuedToken> {
        let expires_at = now
            .checked_add(self.ttl)
            .context("token expiry out of range")?;
        let claims = Claims {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user.id, "jwt signed");
        Ok(IssuedToken { token, expires_at })
    }

    /// Checks signature and expiry, then returns the embedded claims.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = %data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}
