//! Lookup trait definitions for the studbook
//!
//! These traits define the read interfaces the trait engine consumes:
//! - `HorseLookup`: single horse by id, batched parent-link lookup
//! - `CompetitionLookup`: batched competition history lookup
//!
//! All traits are async and backend-agnostic. An in-memory backend is
//! provided via the `memory` module.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::schema::{CompetitionRecord, HorseId, HorseRecord, HorseRef};

/// Result type for studbook lookups
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// ---------------------------------------------------------------------------
// HorseLookup: identity and pedigree
// ---------------------------------------------------------------------------

/// Read access to horses and their parent links.
///
/// Guarantees:
/// - `get_horse_by_id` returns `Ok(None)` for an unknown id; `Err` is
///   reserved for backend failures.
/// - `find_parent_records` returns one `HorseRef` per known id, in the
///   order the ids were requested. Unknown ids are skipped, duplicates are
///   collapsed.
#[async_trait]
pub trait HorseLookup: Send + Sync {
    /// Fetch the full record of one horse.
    async fn get_horse_by_id(&self, id: HorseId) -> StorageResult<Option<HorseRecord>>;

    /// Fetch the pedigree nodes for a batch of ids.
    async fn find_parent_records(&self, ids: &[HorseId]) -> StorageResult<Vec<HorseRef>>;
}

// ---------------------------------------------------------------------------
// CompetitionLookup: historical results
// ---------------------------------------------------------------------------

/// Read access to competition history.
///
/// Guarantees:
/// - Results for every requested id are returned, grouped by id in request
///   order; an id with no history contributes nothing.
#[async_trait]
pub trait CompetitionLookup: Send + Sync {
    /// Fetch every recorded result of the given horses.
    async fn find_competition_results(
        &self,
        ancestor_ids: &[HorseId],
    ) -> StorageResult<Vec<CompetitionRecord>>;
}
