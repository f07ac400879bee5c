use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{AuthProvider, Session};
use crate::error::{HelpdeskError, Result};

/// In-process identity provider with a fixed credential table.
#[derive(Default)]
pub struct MemoryAuth {
    users: HashMap<String, String>,
    current: Mutex<Option<Session>>,
    fail_lookup: AtomicBool,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, email: &str, password: &str) -> Self {
        self.users.insert(email.to_string(), password.to_string());
        self
    }

    /// Start already signed in as `email`.
    pub fn signed_in(self, email: &str) -> Self {
        self.set_current(Some(issue_session(email)));
        self
    }

    /// Make `get_session` fail until switched off again.
    pub fn fail_session_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock_current().is_some()
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn set_current(&self, session: Option<Session>) {
        *self.lock_current() = session;
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn issue_session(email: &str) -> Session {
    Session::new(email, format!("memory-token-{email}"), None, None)
}

#[async_trait::async_trait]
impl AuthProvider for MemoryAuth {
    async fn get_session(&self) -> Result<Option<Session>> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(HelpdeskError::Other("session store unavailable".into()));
        }
        Ok(self.lock_current().clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        match self.users.get(email) {
            Some(expected) if expected == password => {
                let session = issue_session(email);
                self.set_current(Some(session.clone()));
                Ok(session)
            }
            _ => Err(HelpdeskError::Auth("invalid login credentials".into())),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.set_current(None);
        Ok(())
    }
}
