use super::{IDispatchLogRepo, TryInsert};
use crate::repos::shared::inmemory_repo::*;
use fidelo_domain::{DispatchLogEntry, ReminderKind, ID};
use std::sync::Mutex;

pub struct InMemoryDispatchLogRepo {
    entries: Mutex<Vec<DispatchLogEntry>>,
}

impl InMemoryDispatchLogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDispatchLogRepo for InMemoryDispatchLogRepo {
    async fn try_insert(&self, entry: &DispatchLogEntry) -> anyhow::Result<TryInsert> {
        let mut entries = self.entries.lock().unwrap();
        let exists = entries
            .iter()
            .any(|e| e.benefit_id == entry.benefit_id && e.kind == entry.kind);
        if exists {
            return Ok(TryInsert::AlreadyExists);
        }
        entries.push(entry.clone());
        Ok(TryInsert::Inserted)
    }

    async fn find(&self, benefit_id: &ID, kind: ReminderKind) -> Option<DispatchLogEntry> {
        find_by(&self.entries, |e| {
            &e.benefit_id == benefit_id && e.kind == kind
        })
        .into_iter()
        .next()
    }

    async fn find_by_benefit(&self, benefit_id: &ID) -> anyhow::Result<Vec<DispatchLogEntry>> {
        Ok(find_by(&self.entries, |e| &e.benefit_id == benefit_id))
    }
}
