use axum::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::GoogleConfig;

/// What a completed provider handshake yields: a stable subject id and the
/// account email. Everything upstream of this (consent screen, code grant,
/// signature checks on the provider side) is the provider's problem.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub subject: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL the browser is redirected to, carrying the CSRF
    /// `state` value echoed back on callback.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges the callback `code` for the caller's identity.
    async fn exchange_code(&self, code: &str) -> anyhow::Result<ExternalIdentity>;
}

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub struct GoogleIdentityProvider {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorize_url(&self, state: &str) -> String {
        let url = reqwest::Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .expect("static authorize endpoint parses");
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> anyhow::Result<ExternalIdentity> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let info: UserInfo = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(subject = %info.sub, "identity exchange completed");
        Ok(ExternalIdentity {
            subject: info.sub,
            email: info.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleIdentityProvider {
        GoogleIdentityProvider::new(GoogleConfig {
            client_id: "test-client".into(),
            client_secret: "test".into(),
            redirect_uri: "http://localhost:8080/api/auth/callback".into(),
        })
    }

    #[test]
    fn authorize_url_carries_handshake_params() {
        let url = provider().authorize_url("nonce-123");
        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("state=nonce-123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Fcallback"));
    }
}
