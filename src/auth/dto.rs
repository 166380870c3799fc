use serde::{Deserialize, Serialize};

/// Response for `GET /api/auth/me`. Any failure to authenticate collapses
/// into the benign `{"authenticated": false}` shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl MeResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            email: None,
            is_admin: None,
        }
    }

    pub fn authenticated(email: String, is_admin: bool) -> Self {
        Self {
            authenticated: true,
            email: Some(email),
            is_admin: Some(is_admin),
        }
    }
}

/// Query parameters Google appends to the callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_serializes_without_identity_fields() {
        let json = serde_json::to_string(&MeResponse::anonymous()).unwrap();
        assert_eq!(json, r#"{"authenticated":false}"#);
    }

    #[test]
    fn authenticated_serializes_camel_case() {
        let json =
            serde_json::to_string(&MeResponse::authenticated("owner@example.com".into(), true))
                .unwrap();
        assert!(json.contains(r#""authenticated":true"#));
        assert!(json.contains(r#""email":"owner@example.com""#));
        assert!(json.contains(r#""isAdmin":true"#));
    }
}
