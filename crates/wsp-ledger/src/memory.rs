use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use wsp_types::ObjectId;

use crate::error::LedgerResult;
use crate::object::LedgerObject;
use crate::traits::LedgerClient;

/// In-memory ledger for tests, local demos, and embedding.
///
/// Records every batch it is asked for so callers can assert on round trips.
#[derive(Default)]
pub struct InMemoryLedger {
    objects: RwLock<HashMap<ObjectId, LedgerObject>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<ObjectId>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object.
    pub fn insert(&self, object: LedgerObject) {
        self.objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(object.object_id, object);
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of `multi_get_objects` calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every batch of ids requested, in call order.
    pub fn requests(&self) -> Vec<Vec<ObjectId>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn multi_get_objects(&self, ids: &[ObjectId]) -> LedgerResult<Vec<Option<LedgerObject>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ids.to_vec());
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        Ok(ids.iter().map(|id| objects.get(id).cloned()).collect())
    }
}
