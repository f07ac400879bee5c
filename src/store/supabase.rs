//! PostgREST-backed ticket store.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use super::TicketStore;
use crate::auth::AuthProvider;
use crate::config::Backend;
use crate::error::{HelpdeskError, Result};
use crate::http;
use crate::types::{TICKETS_TABLE, Ticket, TicketStatus};

#[derive(Serialize)]
struct StatusPatch {
    status: TicketStatus,
}

/// Reads and updates `tickets` through `/rest/v1` as the signed-in user.
///
/// The bearer token is looked up from the auth provider on every request, so
/// a session refreshed mid-visit is picked up by the next poll.
pub struct SupabaseStore {
    client: Client,
    backend: Backend,
    auth: Arc<dyn AuthProvider>,
}

impl SupabaseStore {
    pub fn new(backend: Backend, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            backend,
            auth,
        })
    }

    async fn access_token(&self) -> Result<String> {
        match self.auth.get_session().await? {
            Some(session) => Ok(session.access_token().to_string()),
            None => Err(HelpdeskError::NotAuthenticated),
        }
    }

    fn table_url(&self) -> Result<url::Url> {
        http::endpoint(&self.backend, &format!("rest/v1/{TICKETS_TABLE}"))
    }

    fn list_request(&self, access_token: &str) -> Result<RequestBuilder> {
        Ok(self
            .client
            .get(self.table_url()?)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .headers(http::auth_headers(&self.backend, Some(access_token))?))
    }

    fn update_request(
        &self,
        access_token: &str,
        id: i64,
        status: TicketStatus,
    ) -> Result<RequestBuilder> {
        Ok(self
            .client
            .patch(self.table_url()?)
            .query(&[("id", format!("eq.{id}"))])
            .headers(http::auth_headers(&self.backend, Some(access_token))?)
            .header("Prefer", "return=minimal")
            .json(&StatusPatch { status }))
    }
}

#[async_trait::async_trait]
impl TicketStore for SupabaseStore {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let token = self.access_token().await?;
        let response = http::check(self.list_request(&token)?.send().await?).await?;
        let body = response.bytes().await?;
        let tickets: Vec<Ticket> = serde_json::from_slice(&body)?;
        tracing::debug!(count = tickets.len(), "fetched tickets");
        Ok(tickets)
    }

    async fn set_status(&self, id: i64, status: TicketStatus) -> Result<()> {
        let token = self.access_token().await?;
        http::check(self.update_request(&token, id, status)?.send().await?).await?;
        tracing::debug!(id, %status, "status updated");
        Ok(())
    }
}
