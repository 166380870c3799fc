use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;
use crate::state::AppState;

pub use crate::auth::claims::Claims;

/// Signing and verification keys, derived once from the process-wide secret.
/// Rotating the secret silently invalidates every outstanding token.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, email: &str, is_admin: bool) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: email.to_string(),
            admin: is_admin,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(email = %email, admin = is_admin, "jwt signed");
        Ok(token)
    }

    /// Fails on malformed input, bad signature, or elapsed expiry without
    /// distinguishing the cause to the caller.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(email = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrips_claims() {
        let keys = make_keys();
        let token = keys.sign("owner@example.com", true).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "owner@example.com");
        assert!(claims.admin);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn non_admin_flag_survives_roundtrip() {
        let keys = make_keys();
        let token = keys.sign("visitor@example.com", false).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "visitor@example.com");
        assert!(!claims.admin);
    }

    #[tokio::test]
    async fn expired_token_is_invalid() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: "owner@example.com".into(),
            admin: true,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(!keys.is_valid(&token));
    }

    #[tokio::test]
    async fn malformed_tokens_are_invalid_not_panics() {
        let keys = make_keys();
        assert!(!keys.is_valid(""));
        assert!(!keys.is_valid("garbage"));
        assert!(!keys.is_valid("a.b.c"));
        assert!(!keys.is_valid("eyJhbGciOiJIUzI1NiJ9.not-base64!.sig"));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            ttl: Duration::from_secs(300),
        };
        let token = other.sign("owner@example.com", true).expect("sign");
        assert!(!keys.is_valid(&token));
        assert!(other.is_valid(&token));
    }
}
