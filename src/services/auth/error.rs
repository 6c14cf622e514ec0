use thiserror::Error;

/// Failure reasons for token extraction and resolution.
///
/// "No token supplied" is deliberately NOT a variant here. Extraction reports
/// it as `Ok(None)` so callers can pick their own behavior for credential-less
/// requests instead of pattern-matching an error.
#[derive(Debug, Error)]
pub enum UserInfoError {
    /// The `Authorization` header was present but not exactly `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedAuthorizationHeader,

    /// No `Authorization` header, and the content type was not
    /// `application/x-www-form-urlencoded`. Carries the observed value.
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(Option<String>),

    /// The transport failed while reading the request body.
    #[error("failed to read request body")]
    BodyRead(#[source] axum::Error),

    /// The validation service completed without fault but did not recognize
    /// the token identifier.
    #[error("unknown access token")]
    UnknownToken,

    /// The validation service call itself failed.
    #[error("token validation service failure")]
    ValidationService(#[source] anyhow::Error),
}
