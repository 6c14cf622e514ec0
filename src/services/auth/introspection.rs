use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use url::Url;

use crate::services::auth::token_resolver::{
    AuthorizationContextToken, TokenValidationService, ValidationResponse,
};

/// Token introspection client (RFC 7662).
///
/// Posts the token identifier form-encoded to the configured endpoint and
/// maps the answer onto [`ValidationResponse`]: `active: false` (or a payload
/// that omits it) means the token is unknown, not a fault. Timeouts and
/// retries are the transport's business; this client makes exactly one call.
pub struct IntrospectionClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Option<(String, String)>,
}

/// Wire shape of the introspection answer. Everything but `active` is
/// optional and passed through untouched.
#[derive(Debug, Deserialize)]
struct IntrospectionResponse {
    #[serde(default)]
    active: bool,
    sub: Option<String>,
    scope: Option<String>,
    exp: Option<i64>,
}

impl IntrospectionClient {
    pub fn new(endpoint: Url, credentials: Option<(String, String)>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            credentials,
        }
    }
}

#[async_trait]
impl TokenValidationService for IntrospectionClient {
    async fn validate(&self, token: &str) -> anyhow::Result<ValidationResponse> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .form(&[("token", token)]);
        if let Some((client_id, client_secret)) = &self.credentials {
            request = request.basic_auth(client_id, Some(client_secret));
        }

        let response = request
            .send()
            .await
            .context("introspection request failed")?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("introspection endpoint answered {status}");
        }

        let payload: IntrospectionResponse = response
            .json()
            .await
            .context("invalid introspection payload")?;
        Ok(response_from_payload(token, payload))
    }
}

fn response_from_payload(token: &str, payload: IntrospectionResponse) -> ValidationResponse {
    if !payload.active {
        return ValidationResponse::unknown();
    }

    ValidationResponse::known(AuthorizationContextToken {
        token_string: token.to_string(),
        subject: payload.sub,
        scopes: payload
            .scope
            .map(|scope| scope.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        expires_at: payload.exp.and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}
