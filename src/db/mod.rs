//! Activity Record Store boundary.
//!
//! The store itself lives elsewhere in the platform; the engine only
//! depends on this read-only query seam and on the ingestion step that
//! turns the store's loose record shape into the typed model.

pub mod ingest;

pub use ingest::{normalize_snapshot, RawActivityRecord};

use crate::error::Result;

/// Read-only query interface to the external Activity Record Store.
///
/// Implementations return every auto-verified activity record for a
/// challenge. Manually-submitted, unverified proof never appears here.
/// The query is idempotent and side-effect free; timeout policy belongs
/// to the implementation (the engine treats "took too long" and
/// "returned an error" identically).
#[async_trait::async_trait]
pub trait ActivityRecordStore: Send + Sync {
    /// Fetch all verified activity records for one challenge.
    async fn fetch_verified_records(&self, challenge_id: &str) -> Result<Vec<RawActivityRecord>>;
}
