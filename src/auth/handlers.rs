use axum::{
    extract::{FromRef, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use rand::{distributions::Alphanumeric, Rng};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{CallbackParams, MeResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        repo::User,
    },
    state::AppState,
};

const STATE_COOKIE: &str = "oauth_state";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/me", get(me))
}

/// Starts the handshake: remember a CSRF nonce in a short-lived cookie and
/// send the browser to the provider's consent screen.
#[instrument(skip(state))]
pub async fn login(State(state): State<AppState>) -> impl IntoResponse {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let url = state.identity.authorize_url(&nonce);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        format!("{STATE_COOKIE}={nonce}; Max-Age=600; Path=/; HttpOnly; SameSite=Lax")
            .parse()
            .expect("alphanumeric cookie value"),
    );
    (headers, Redirect::temporary(&url))
}

/// Completes the handshake: verify the CSRF nonce, exchange the code for an
/// identity, upsert the local user, and hand the signed token to the
/// frontend via redirect.
#[instrument(skip(app, params, headers))]
pub async fn callback(
    State(app): State<AppState>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Result<Redirect, (StatusCode, String)> {
    let expected = state_cookie(&headers);
    if expected.as_deref() != Some(params.state.as_str()) {
        warn!("oauth state mismatch");
        return Err((StatusCode::BAD_REQUEST, "State mismatch".into()));
    }

    let identity = app.identity.exchange_code(&params.code).await.map_err(|e| {
        error!(error = %e, "identity exchange failed");
        (StatusCode::BAD_GATEWAY, "Identity provider error".into())
    })?;

    let is_admin = app.config.is_admin_email(&identity.email);
    let user = User::find_or_create(&app.db, &identity.email, &identity.subject, is_admin)
        .await
        .map_err(internal)?;

    let keys = JwtKeys::from_ref(&app);
    let token = keys.sign(&user.email, user.is_admin).map_err(internal)?;

    info!(user_id = %user.id, email = %user.email, admin = user.is_admin, "login completed");
    let redirect = format!("{}/console?token={}", app.config.frontend_url(), token);
    Ok(Redirect::temporary(&redirect))
}

/// Identity check for the frontend. Always 200; an unauthenticated caller
/// (or a token whose email no longer resolves) gets `authenticated: false`.
#[instrument(skip(state, user))]
pub async fn me(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Json<MeResponse>, (StatusCode, String)> {
    let Some(user) = user else {
        return Ok(Json(MeResponse::anonymous()));
    };

    match User::find_by_email(&state.db, &user.email).await {
        Ok(Some(_)) => Ok(Json(MeResponse::authenticated(user.email, user.is_admin))),
        Ok(None) => Ok(Json(MeResponse::anonymous())),
        Err(e) => Err(internal(e)),
    }
}

fn state_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("oauth_state="))
        .map(str::to_string)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn state_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; oauth_state=nonce-123; lang=en"),
        );
        assert_eq!(state_cookie(&headers).as_deref(), Some("nonce-123"));
    }

    #[test]
    fn state_cookie_absent_yields_none() {
        assert_eq!(state_cookie(&HeaderMap::new()), None);
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(state_cookie(&headers), None);
    }

    #[tokio::test]
    async fn callback_rejects_state_mismatch() {
        let app = AppState::fake();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("oauth_state=expected-nonce"),
        );
        let (status, _) = callback(
            State(app),
            Query(CallbackParams {
                code: "code-1".into(),
                state: "tampered-nonce".into(),
            }),
            headers,
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn callback_rejects_missing_state_cookie() {
        let app = AppState::fake();
        let (status, _) = callback(
            State(app),
            Query(CallbackParams {
                code: "code-1".into(),
                state: "some-nonce".into(),
            }),
            HeaderMap::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
