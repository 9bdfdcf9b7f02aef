mod inmemory;
mod postgres;

pub use inmemory::InMemoryDispatchLogRepo;
pub use postgres::PostgresDispatchLogRepo;

use fidelo_domain::{DispatchLogEntry, ReminderKind, ID};

/// Result of attempting to append a ledger entry. A pair that is already
/// recorded is not an error: a duplicate insert means another run (or a
/// concurrent one) already handled the reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryInsert {
    Inserted,
    AlreadyExists,
}

#[async_trait::async_trait]
pub trait IDispatchLogRepo: Send + Sync {
    /// Appends the entry unless one already exists for the same
    /// (benefit, kind) pair. Entries are immutable once written.
    async fn try_insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<TryInsert>;
    async fn find(&self, benefit_id: &ID, kind: ReminderKind) -> Option<DispatchLogEntry>;
    async fn find_by_benefit(&self, benefit_id: &ID) -> anyhow::Result<Vec<DispatchLogEntry>>;
}
