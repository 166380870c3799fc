use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use tracing::warn;

use crate::auth::jwt::JwtKeys;

/// Extracts and validates the bearer JWT, yielding the caller's identity as
/// recorded in the token. The admin flag is decoded from the token, not
/// re-fetched from the user directory.
#[derive(Debug)]
pub struct AuthUser {
    pub email: String,
    pub is_admin: bool,
}

/// `AuthUser` plus a decoded admin flag; the gate for `/api/admin/*`.
#[derive(Debug)]
pub struct AdminUser(pub AuthUser);

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let token = bearer_token(&parts.headers).ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing or malformed Authorization header".to_string(),
        ))?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err((
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        Ok(AuthUser {
            email: claims.sub,
            is_admin: claims.admin,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            warn!(email = %user.email, "admin access denied");
            return Err((StatusCode::FORBIDDEN, "Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{HeaderValue, Request};

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn request_parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/admin/skills");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    fn signed_token(state: &AppState, email: &str, is_admin: bool) -> String {
        JwtKeys::from_ref(state).sign(email, is_admin).expect("sign")
    }

    #[test]
    fn bearer_token_strips_scheme() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_accepts_lowercase_scheme() {
        let headers = headers_with_auth("bearer abc");
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_absence() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = request_parts(None);
        let (status, _) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbled_token_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = request_parts(Some("Bearer not-a-jwt"));
        let (status, _) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_yields_decoded_identity() {
        let state = AppState::fake();
        let token = signed_token(&state, "owner@example.com", true);
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("authenticated");
        assert_eq!(user.email, "owner@example.com");
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn non_admin_token_is_forbidden_not_unauthorized() {
        let state = AppState::fake();
        let token = signed_token(&state, "visitor@example.com", false);

        // authenticates fine...
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("authenticated");
        assert!(!user.is_admin);

        // ...but the admin gate rejects with 403, not 401
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let (status, _) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_gate_rejects_missing_token_as_unauthorized() {
        let state = AppState::fake();
        let mut parts = request_parts(None);
        let (status, _) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_token_passes_admin_gate() {
        let state = AppState::fake();
        let token = signed_token(&state, "owner@example.com", true);
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let AdminUser(user) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .expect("admin");
        assert_eq!(user.email, "owner@example.com");
    }
}
