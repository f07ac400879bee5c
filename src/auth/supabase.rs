//! GoTrue-compatible password authentication.

use jiff::{SignedDuration, Timestamp};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AuthProvider, Session, SessionFile};
use crate::config::{Backend, Config};
use crate::error::{HelpdeskError, Result};
use crate::http;

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<TokenUser>,
}

#[derive(Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}

impl TokenResponse {
    fn into_session(self, fallback_email: &str, now: Timestamp) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| Timestamp::from_second(secs).ok())
            .or_else(|| {
                self.expires_in
                    .and_then(|secs| now.checked_add(SignedDuration::from_secs(secs)).ok())
            });
        let email = self
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| fallback_email.to_string());
        Session::new(email, self.access_token, self.refresh_token, expires_at)
    }
}

/// Password sign-in against `/auth/v1`, persisting the session to disk.
pub struct SupabaseAuth {
    client: Client,
    backend: Backend,
    file: SessionFile,
}

impl SupabaseAuth {
    pub fn new(backend: Backend, file: SessionFile) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            backend,
            file,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend()?, SessionFile::default_location()?)
    }

    async fn token(&self, grant_type: &str, body: &impl Serialize, email: &str) -> Result<Session> {
        let url = http::endpoint(&self.backend, "auth/v1/token")?;
        let response = self
            .client
            .post(url)
            .query(&[("grant_type", grant_type)])
            .headers(http::auth_headers(&self.backend, None)?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let (status, message) = http::error_message(response).await;
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    HelpdeskError::Auth(message)
                }
                _ => HelpdeskError::Api(format!("{message} ({status})")),
            });
        }

        let token: TokenResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(token.into_session(email, Timestamp::now()))
    }

    async fn refresh(&self, stale: &Session) -> Result<Option<Session>> {
        let Some(refresh_token) = stale.refresh_token() else {
            return Ok(None);
        };
        let grant = RefreshGrant { refresh_token };
        let session = self.token("refresh_token", &grant, &stale.email).await?;
        self.file.save(&session)?;
        tracing::info!(email = %session.email, "session refreshed");
        Ok(Some(session))
    }
}

#[async_trait::async_trait]
impl AuthProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.file.load()? else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        match self.refresh(&session).await {
            Ok(Some(refreshed)) => Ok(Some(refreshed)),
            Ok(None) => {
                self.file.clear()?;
                Ok(None)
            }
            Err(HelpdeskError::Auth(message)) => {
                tracing::warn!(error = %message, "refresh token rejected, signing out locally");
                self.file.clear()?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session refresh failed, keeping stored session");
                Err(e)
            }
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let grant = PasswordGrant { email, password };
        let session = self.token("password", &grant, email).await?;
        self.file.save(&session)?;
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.file.load()? {
            let url = http::endpoint(&self.backend, "auth/v1/logout")?;
            let result = self
                .client
                .post(url)
                .headers(http::auth_headers(&self.backend, Some(session.access_token()))?)
                .send()
                .await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), "remote sign-out rejected");
                }
                Err(e) => tracing::warn!(error = %e, "remote sign-out failed"),
                Ok(_) => {}
            }
        }
        self.file.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_token_response_expiry_from_expires_at() {
        let now: Timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        let body = r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"expires_at":1767229200,"user":{"email":"x@y.z"}}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        let session = token.into_session("fallback@y.z", now);
        assert_eq!(session.email, "x@y.z");
        assert_eq!(session.expires_at, Some(Timestamp::from_second(1767229200).unwrap()));
    }

    #[test]
    fn test_token_response_expiry_from_expires_in() {
        let now: Timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","expires_in":60}"#).unwrap();
        let session = token.into_session("fallback@y.z", now);
        assert_eq!(session.email, "fallback@y.z");
        assert_eq!(session.expires_at, Some(now + SignedDuration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_get_session_reads_unexpired_file_without_network() {
        let dir = TempDir::new().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        file.save(&Session::new("it@ptpn4.co.id", "tok", None, None))
            .unwrap();

        let backend = Backend {
            url: url::Url::parse("http://127.0.0.1:9").unwrap(),
            anon_key: "anon".into(),
        };
        let auth = SupabaseAuth::new(backend, file).unwrap();
        let session = auth.get_session().await.unwrap().unwrap();
        assert_eq!(session.email, "it@ptpn4.co.id");
    }

    #[tokio::test]
    async fn test_expired_session_without_refresh_token_is_cleared() {
        let dir = TempDir::new().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        let past: Timestamp = "2020-01-01T00:00:00Z".parse().unwrap();
        file.save(&Session::new("it@ptpn4.co.id", "tok", None, Some(past)))
            .unwrap();

        let backend = Backend {
            url: url::Url::parse("http://127.0.0.1:9").unwrap(),
            anon_key: "anon".into(),
        };
        let auth = SupabaseAuth::new(backend, file.clone()).unwrap();
        assert!(auth.get_session().await.unwrap().is_none());
        assert!(!file.path().exists());
    }

    fn expired_session_file(dir: &TempDir) -> SessionFile {
        let file = SessionFile::new(dir.path().join("session.json"));
        let past: Timestamp = "2020-01-01T00:00:00Z".parse().unwrap();
        file.save(&Session::new(
            "it@ptpn4.co.id",
            "stale-token",
            Some("stale-refresh".into()),
            Some(past),
        ))
        .unwrap();
        file
    }

    fn backend_at(url: &str) -> Backend {
        Backend {
            url: url::Url::parse(url).unwrap(),
            anon_key: "anon".into(),
        }
    }

    #[tokio::test]
    async fn test_expired_session_is_refreshed_and_rewritten() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_json(serde_json::json!({ "refresh_token": "stale-refresh" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "refresh_token": "fresh-refresh",
                "expires_in": 3600,
                "user": { "email": "it@ptpn4.co.id" },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let file = expired_session_file(&dir);
        let auth = SupabaseAuth::new(backend_at(&server.uri()), file.clone()).unwrap();

        let session = auth.get_session().await.unwrap().unwrap();
        assert_eq!(session.access_token(), "fresh-token");
        assert!(!session.is_expired());

        let saved = file.load().unwrap().unwrap();
        assert_eq!(saved.access_token(), "fresh-token");
        assert_eq!(saved.refresh_token(), Some("fresh-refresh"));
    }

    #[tokio::test]
    async fn test_rejected_refresh_token_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Invalid Refresh Token: Already Used",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let file = expired_session_file(&dir);
        let auth = SupabaseAuth::new(backend_at(&server.uri()), file.clone()).unwrap();

        assert!(auth.get_session().await.unwrap().is_none());
        assert!(!file.path().exists());
    }

    #[tokio::test]
    async fn test_unreachable_backend_keeps_stored_session() {
        let dir = TempDir::new().unwrap();
        let file = expired_session_file(&dir);
        let auth = SupabaseAuth::new(backend_at("http://127.0.0.1:9"), file.clone()).unwrap();

        assert!(matches!(
            auth.get_session().await,
            Err(HelpdeskError::Http(_))
        ));
        let kept = file.load().unwrap().unwrap();
        assert_eq!(kept.refresh_token(), Some("stale-refresh"));
    }
}
