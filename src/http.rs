//! Shared HTTP plumbing for the hosted backend.
//!
//! # Security
//!
//! The anon key and the session access token travel in request headers. They
//! are wrapped in [`RedactedHeader`] so that `Debug`/`Display` never print
//! them, even with `HELPDESK_LOG=reqwest=debug`.

use std::fmt;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::config::Backend;
use crate::error::{HelpdeskError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wrapper for sensitive header values that redacts the value when formatted.
pub struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn bearer(token: &str) -> Self {
        Self::new(&format!("Bearer {token}"))
    }

    pub fn as_header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.value)
            .map_err(|_| HelpdeskError::Config("credential contains invalid characters".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Build the HTTP client used for every backend call.
///
/// Configures a 10s connect timeout and a 30s total timeout.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Headers every backend request carries: the project `apikey` and, when
/// signed in, the user's bearer token. Anonymous calls send the anon key as
/// the bearer too.
pub fn auth_headers(backend: &Backend, access_token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "apikey",
        RedactedHeader::new(&backend.anon_key).as_header_value()?,
    );
    let bearer = RedactedHeader::bearer(access_token.unwrap_or(&backend.anon_key));
    headers.insert(header::AUTHORIZATION, bearer.as_header_value()?);
    Ok(headers)
}

/// Join a path such as `rest/v1/tickets` onto the backend base URL.
pub fn endpoint(backend: &Backend, path: &str) -> Result<url::Url> {
    let mut base = backend.url.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .map_err(|e| HelpdeskError::Config(format!("invalid backend URL: {e}")))
}

/// Error body shapes returned by PostgREST and GoTrue.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

/// Turn a non-2xx response into an error message, preferring the body's own
/// `message` over the bare status line.
pub async fn error_message(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    (status, message)
}

/// Pass a successful response through, mapping failures to [`HelpdeskError::Api`].
pub async fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let (status, message) = error_message(response).await;
    Err(HelpdeskError::Api(format!("{message} ({status})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(url: &str) -> Backend {
        Backend {
            url: url::Url::parse(url).unwrap(),
            anon_key: "anon-key-value".to_string(),
        }
    }

    #[test]
    fn test_redacted_header_formatting() {
        let header = RedactedHeader::bearer("super-secret");
        assert_eq!(format!("{header}"), "[REDACTED]");
        assert!(!format!("{header:?}").contains("super-secret"));
        assert!(header.as_header_value().unwrap().is_sensitive());
    }

    #[test]
    fn test_auth_headers_fall_back_to_anon_key() {
        let headers = auth_headers(&backend("https://x.supabase.co"), None).unwrap();
        assert_eq!(headers["apikey"], "anon-key-value");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer anon-key-value");

        let headers = auth_headers(&backend("https://x.supabase.co"), Some("tok")).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint(&backend("https://host.example/proxy"), "rest/v1/tickets").unwrap();
        assert_eq!(url.as_str(), "https://host.example/proxy/rest/v1/tickets");

        let url = endpoint(&backend("https://x.supabase.co"), "auth/v1/token").unwrap();
        assert_eq!(url.as_str(), "https://x.supabase.co/auth/v1/token");
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));
    }
}
