//! Authentication: sessions, providers, and the guard in front of protected views.

mod memory;
mod session_file;
mod supabase;

pub use memory::MemoryAuth;
pub use session_file::SessionFile;
pub use supabase::SupabaseAuth;

use std::fmt;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use secrecy::{ExposeSecret, SecretBox};

use crate::error::{HelpdeskError, Result};
use crate::router::{Navigator, Route};

/// Tokens are treated as expired this long before their real expiry.
const EXPIRY_SKEW: SignedDuration = SignedDuration::from_secs(30);

/// An authenticated identity.
///
/// Tokens are kept in [`SecretBox`] and never appear in `Debug` output.
pub struct Session {
    pub email: String,
    access_token: SecretBox<String>,
    refresh_token: Option<SecretBox<String>>,
    pub expires_at: Option<Timestamp>,
}

impl Session {
    pub fn new(
        email: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<Timestamp>,
    ) -> Self {
        Self {
            email: email.into(),
            access_token: SecretBox::new(Box::new(access_token.into())),
            refresh_token: refresh_token.map(|t| SecretBox::new(Box::new(t))),
            expires_at,
        }
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    /// Whether the access token is expired (or about to be) at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(expires_at) => now + EXPIRY_SKEW >= expires_at,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self::new(
            self.email.clone(),
            self.access_token().to_string(),
            self.refresh_token().map(str::to_string),
            self.expires_at,
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("email", &self.email)
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Identity provider reached by the dashboard and the CLI.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current session, if any. Never prompts.
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Exchange credentials for a session. Rejected credentials yield
    /// [`HelpdeskError::Auth`].
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;
}

/// Result of a guard check.
#[derive(Debug)]
pub enum GuardOutcome {
    Authorized(Session),
    /// No session. The guard already navigated to the login route.
    Redirected,
}

/// Gate in front of protected views.
///
/// A check runs once per mount. It does not watch for later expiry; that is
/// noticed on the next check.
#[derive(Clone)]
pub struct SessionGuard {
    provider: Arc<dyn AuthProvider>,
}

impl SessionGuard {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the session, pushing [`Route::Login`] exactly once when there is none.
    ///
    /// A provider failure counts as logged out.
    pub async fn check(&self, navigator: &mut dyn Navigator) -> GuardOutcome {
        match self.provider.get_session().await {
            Ok(Some(session)) => GuardOutcome::Authorized(session),
            Ok(None) => {
                tracing::info!("no session, redirecting to login");
                navigator.navigate(Route::Login);
                GuardOutcome::Redirected
            }
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed, redirecting to login");
                navigator.navigate(Route::Login);
                GuardOutcome::Redirected
            }
        }
    }

    /// Non-interactive variant for CLI commands: no navigation, just an error.
    pub async fn require(&self) -> Result<Session> {
        match self.provider.get_session().await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(HelpdeskError::NotAuthenticated),
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed");
                Err(HelpdeskError::NotAuthenticated)
            }
        }
    }
}
