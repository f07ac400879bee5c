//! Data access for the ticket table.

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::error::Result;
use crate::types::{Ticket, TicketStatus};

/// Thin facade over the backend ticket table.
///
/// Implementations do not retry. Transient and permanent failures surface the
/// same way and the caller decides what to keep.
#[async_trait::async_trait]
pub trait TicketStore: Send + Sync {
    /// Every ticket, newest first.
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Overwrite the status of one ticket. Accepts any status unconditionally;
    /// transition rules live in [`crate::lifecycle`].
    async fn set_status(&self, id: i64, status: TicketStatus) -> Result<()>;
}
