use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::services::auth::error::UserInfoError;

/// A validator-confirmed access token plus the metadata the validator
/// assigned to it. The metadata fields are pass-through: this service does
/// not interpret them beyond serializing the claims response.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorizationContextToken {
    /// The exact token identifier that was resolved.
    pub token_string: String,
    pub subject: Option<String>,
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Answer from the validation service: either a confirmed authorization
/// context, or "completed, but I don't know this token".
#[derive(Clone, Debug, Default)]
pub struct ValidationResponse {
    context: Option<AuthorizationContextToken>,
}

impl ValidationResponse {
    pub fn known(context: AuthorizationContextToken) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn unknown() -> Self {
        Self { context: None }
    }

    pub fn into_context(self) -> Option<AuthorizationContextToken> {
        self.context
    }
}

/// The external service that confirms whether a token identifier is currently
/// valid. Injected into [`TokenResolver`] at construction so tests can swap
/// in a programmable stand-in.
///
/// Contract: implementations must echo the input identifier back as
/// `token_string` in any context they return.
#[async_trait]
pub trait TokenValidationService: Send + Sync {
    async fn validate(&self, token: &str) -> anyhow::Result<ValidationResponse>;
}

/// Resolves a token identifier into an authorization context via the injected
/// validation service. One call per resolution: no retries, no caching.
pub struct TokenResolver {
    validator: Arc<dyn TokenValidationService>,
}

impl TokenResolver {
    pub fn new(validator: Arc<dyn TokenValidationService>) -> Self {
        Self { validator }
    }

    pub async fn resolve(
        &self,
        token: &str,
    ) -> Result<AuthorizationContextToken, UserInfoError> {
        let response = self.validator.validate(token).await.map_err(|err| {
            tracing::warn!(error = ?err, "token validation service call failed");
            UserInfoError::ValidationService(err)
        })?;

        match response.into_context() {
            Some(context) => Ok(context),
            None => {
                tracing::debug!("validation service did not recognize the token");
                Err(UserInfoError::UnknownToken)
            }
        }
    }
}
