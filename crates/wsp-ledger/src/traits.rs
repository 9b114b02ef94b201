use async_trait::async_trait;
use wsp_types::ObjectId;

use crate::error::LedgerResult;
use crate::object::LedgerObject;

/// Object lookup on the ledger.
///
/// Implementations must return exactly one entry per requested id, in
/// request order, with `None` for ids that do not exist.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch several objects in one round trip.
    async fn multi_get_objects(&self, ids: &[ObjectId]) -> LedgerResult<Vec<Option<LedgerObject>>>;
}
