use serde::{Deserialize, Serialize};

/// JWT payload used for authentication.
///
/// The admin flag is baked in at issuance and never re-read from the user
/// directory while the token lives; expiry bounds the staleness window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user email
    pub admin: bool, // admin flag at issuance time
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}
