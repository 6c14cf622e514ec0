use serde::Serialize;

use crate::services::auth::AuthorizationContextToken;

/// Claims document returned by `/oauth2/userinfo`.
///
/// Everything here is pass-through from the validation service; fields the
/// validator didn't assign are omitted rather than serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Space-delimited, OAuth2 style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl UserInfoResponse {
    pub fn from_context(context: AuthorizationContextToken) -> Self {
        Self {
            sub: context.subject,
            scope: if context.scopes.is_empty() {
                None
            } else {
                Some(context.scopes.join(" "))
            },
            exp: context.expires_at.map(|t| t.timestamp()),
        }
    }
}
