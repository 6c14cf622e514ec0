use axum::body::{Body, to_bytes};
use axum::http::{Request, header};

use crate::services::auth::error::UserInfoError;

/// The only content type accepted for body-borne tokens. Compared for exact
/// equality, so `application/x-www-form-urlencoded; charset=UTF-8` is rejected.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form parameter carrying the access token (RFC 6750 §2.2).
const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Pulls the bearer access-token identifier out of an inbound request.
///
/// Two mutually exclusive sources are supported:
///
/// - `Authorization: Bearer <token>` — strict: any malformation is an error.
/// - A form-encoded body with an `access_token` parameter — permissive: the
///   parameter may sit among unrelated ones, and leading non-ASCII noise in
///   its value (lossy client encodings) is discarded.
///
/// The request is consumed because its body stream can only be read once.
/// `Ok(None)` means "no token supplied" and is a normal outcome, distinct
/// from every error variant.
#[derive(Clone, Debug)]
pub struct RequestTokenExtractor {
    max_body_bytes: usize,
}

impl RequestTokenExtractor {
    pub fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    pub async fn extract(
        &self,
        request: Request<Body>,
    ) -> Result<Option<String>, UserInfoError> {
        let (parts, body) = request.into_parts();

        if let Some(value) = parts.headers.get(header::AUTHORIZATION) {
            let value = value
                .to_str()
                .map_err(|_| UserInfoError::MalformedAuthorizationHeader)?;
            return bearer_from_header(value).map(Some);
        }

        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if content_type != Some(FORM_CONTENT_TYPE) {
            return Err(UserInfoError::UnsupportedContentType(
                content_type.map(str::to_string),
            ));
        }

        let bytes = to_bytes(body, self.max_body_bytes)
            .await
            .map_err(UserInfoError::BodyRead)?;

        // Noise bytes outside ASCII are expected in the value position, so a
        // lossy conversion is fine: replacement characters are non-ASCII and
        // get stripped along with the rest of the noise.
        let body = String::from_utf8_lossy(&bytes);
        Ok(access_token_from_form(&body))
    }
}

/// Strict `Bearer <token>` parse: exactly two space-separated segments with a
/// non-empty token. Extra whitespace anywhere is a malformation.
fn bearer_from_header(value: &str) -> Result<String, UserInfoError> {
    let mut segments = value.split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(UserInfoError::MalformedAuthorizationHeader),
    }
}

/// Scans `&`-delimited `name=value` pairs for `access_token` (case-sensitive).
/// Returns `None` when the parameter is missing or the body is empty.
fn access_token_from_form(body: &str) -> Option<String> {
    for pair in body.split('&') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        if name == ACCESS_TOKEN_PARAM {
            return Some(strip_leading_noise(value).to_string());
        }
    }
    None
}

/// Drops any run of non-ASCII characters sitting between the `=` and the
/// ASCII token value. The token itself is always ASCII.
fn strip_leading_noise(value: &str) -> &str {
    value.trim_start_matches(|c: char| !c.is_ascii())
}

#[cfg(test)]
mod tests {
    use std::io;

    use axum::body::{Body, Bytes};
    use axum::http::Request;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};

    use super::*;

    const TOKEN: &str = "ZWx1c3VhcmlvOnlsYWNsYXZl";

    fn extractor() -> RequestTokenExtractor {
        RequestTokenExtractor::new(64 * 1024)
    }

    fn request(
        authorization: Option<&str>,
        content_type: Option<&str>,
        body: Body,
    ) -> Request<Body> {
        let mut builder = Request::post("/oauth2/userinfo");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(value) = content_type {
            builder = builder.header(CONTENT_TYPE, value);
        }
        builder.body(body).unwrap()
    }

    #[tokio::test]
    async fn bearer_header_yields_token() {
        let req = request(Some(&format!("Bearer {TOKEN}")), None, Body::empty());
        let extracted = extractor().extract(req).await.unwrap();
        assert_eq!(extracted.as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn bare_token_without_scheme_is_malformed() {
        let req = request(Some(TOKEN), None, Body::empty());
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::MalformedAuthorizationHeader));
    }

    #[tokio::test]
    async fn scheme_without_token_is_malformed() {
        for header in ["Bearer", "Bearer ", &format!("Bearer  {TOKEN}")] {
            let req = request(Some(header), None, Body::empty());
            let err = extractor().extract(req).await.unwrap_err();
            assert!(
                matches!(err, UserInfoError::MalformedAuthorizationHeader),
                "header {header:?} should be rejected",
            );
        }
    }

    #[tokio::test]
    async fn three_segments_are_malformed() {
        let req = request(Some("Bearer a b"), None, Body::empty());
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::MalformedAuthorizationHeader));
    }

    #[tokio::test]
    async fn wrong_content_type_is_rejected() {
        let req = request(None, Some("application/text"), Body::empty());
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::UnsupportedContentType(_)));
    }

    #[tokio::test]
    async fn empty_content_type_is_rejected() {
        let req = request(None, Some(""), Body::empty());
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::UnsupportedContentType(_)));
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let req = request(None, None, Body::empty());
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::UnsupportedContentType(None)));
    }

    #[tokio::test]
    async fn empty_body_means_no_token() {
        let req = request(None, Some(FORM_CONTENT_TYPE), Body::empty());
        let extracted = extractor().extract(req).await.unwrap();
        assert_eq!(extracted, None);
    }

    #[tokio::test]
    async fn body_without_parameter_means_no_token() {
        let body = Body::from("otherParam=value2&someOtherParam=value");
        let req = request(None, Some(FORM_CONTENT_TYPE), body);
        let extracted = extractor().extract(req).await.unwrap();
        assert_eq!(extracted, None);
    }

    #[tokio::test]
    async fn form_body_yields_token() {
        for body in [
            format!("access_token={TOKEN}"),
            format!("access_token={TOKEN}&someOtherParam=value"),
            format!("otherParam=value2&access_token={TOKEN}&someOtherParam=value"),
        ] {
            let req = request(None, Some(FORM_CONTENT_TYPE), Body::from(body.clone()));
            let extracted = extractor().extract(req).await.unwrap();
            assert_eq!(extracted.as_deref(), Some(TOKEN), "body {body:?}");
        }
    }

    #[tokio::test]
    async fn leading_non_ascii_noise_is_discarded() {
        for body in [
            format!("access_token=¥{TOKEN}"),
            format!("access_token=§{TOKEN}&someOtherParam=value"),
            format!("otherParam=value2©&access_token={TOKEN}&someOtherParam=value"),
        ] {
            let req = request(None, Some(FORM_CONTENT_TYPE), Body::from(body.clone()));
            let extracted = extractor().extract(req).await.unwrap();
            assert_eq!(extracted.as_deref(), Some(TOKEN), "body {body:?}");
        }
    }

    #[tokio::test]
    async fn body_read_fault_is_reported() {
        let stream = futures_util::stream::once(async {
            Err::<Bytes, io::Error>(io::Error::other("connection reset"))
        });
        let req = request(None, Some(FORM_CONTENT_TYPE), Body::from_stream(stream));
        let err = extractor().extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::BodyRead(_)));
    }

    #[tokio::test]
    async fn oversize_body_is_a_read_failure() {
        let body = Body::from(format!("access_token={TOKEN}"));
        let req = request(None, Some(FORM_CONTENT_TYPE), body);
        let err = RequestTokenExtractor::new(4).extract(req).await.unwrap_err();
        assert!(matches!(err, UserInfoError::BodyRead(_)));
    }
}
