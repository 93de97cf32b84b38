//! In-memory studbook backend
//!
//! Provides `MemoryStudbook`, which satisfies both lookup traits without any
//! external dependencies. It backs the test suites and the CLI, and can be
//! loaded from a JSON fixture. Fault injection switches let tests exercise
//! the engine's degraded paths.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::lookup_traits::*;
use crate::schema::{CompetitionRecord, HorseId, HorseRecord, HorseRef};

// ---------------------------------------------------------------------------
// Fixture format
// ---------------------------------------------------------------------------

/// One competition result in a fixture, attributed to a horse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResult {
    #[serde(alias = "horse_id")]
    pub horse_id: HorseId,
    pub discipline: String,
    pub placement: String,
}

/// JSON studbook fixture: `{ "horses": [...], "results": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudbookFixture {
    #[serde(default)]
    pub horses: Vec<HorseRecord>,
    #[serde(default)]
    pub results: Vec<FixtureResult>,
}

// ---------------------------------------------------------------------------
// MemoryStudbook
// ---------------------------------------------------------------------------

/// In-memory studbook backed by `HashMap`s keyed by horse id.
///
/// Populate it with the `insert_*` methods before sharing it; lookups only
/// read. Every lookup call, successful or not, is counted.
#[derive(Debug, Default)]
pub struct MemoryStudbook {
    horses: HashMap<HorseId, HorseRecord>,
    results: HashMap<HorseId, Vec<CompetitionRecord>>,
    fail_parent_lookups: AtomicBool,
    fail_competition_lookups: AtomicBool,
    parent_lookup_budget: Mutex<Option<usize>>,
    parent_lookups: AtomicUsize,
    lookups: AtomicUsize,
}

impl MemoryStudbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a studbook from an already parsed fixture.
    pub fn from_fixture(fixture: StudbookFixture) -> Self {
        let mut studbook = Self::new();
        for horse in fixture.horses {
            studbook.insert_horse(horse);
        }
        for result in fixture.results {
            studbook.insert_result(
                result.horse_id,
                CompetitionRecord::new(result.discipline, result.placement),
            );
        }
        studbook
    }

    /// Parse a JSON fixture.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let fixture: StudbookFixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Read and parse a JSON fixture file.
    pub fn load(path: &Path) -> StorageResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let studbook = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            horses = studbook.horses.len(),
            "loaded studbook fixture"
        );
        Ok(studbook)
    }

    /// Insert or replace a horse.
    pub fn insert_horse(&mut self, horse: HorseRecord) {
        self.horses.insert(horse.id, horse);
    }

    /// Append a competition result to a horse's history.
    pub fn insert_result(&mut self, horse_id: impl Into<HorseId>, record: CompetitionRecord) {
        self.results.entry(horse_id.into()).or_default().push(record);
    }

    /// Make every `find_parent_records` call fail while `fail` is set.
    pub fn set_parent_lookup_failure(&self, fail: bool) {
        self.fail_parent_lookups.store(fail, Ordering::SeqCst);
    }

    /// Let the next `calls` parent lookups succeed and fail every one after.
    ///
    /// Counts from the moment of the call, so a walk can be cut off at a
    /// chosen generation.
    pub fn fail_parent_lookups_after(&self, calls: usize) {
        let served = self.parent_lookups.load(Ordering::SeqCst);
        if let Ok(mut budget) = self.parent_lookup_budget.lock() {
            *budget = Some(served + calls);
        }
    }

    /// Make every `find_competition_results` call fail while `fail` is set.
    pub fn set_competition_lookup_failure(&self, fail: bool) {
        self.fail_competition_lookups.store(fail, Ordering::SeqCst);
    }

    /// Number of lookup calls served so far, across both traits.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn horse_count(&self) -> usize {
        self.horses.len()
    }

    fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HorseLookup for MemoryStudbook {
    async fn get_horse_by_id(&self, id: HorseId) -> StorageResult<Option<HorseRecord>> {
        self.record_lookup();
        Ok(self.horses.get(&id).cloned())
    }

    async fn find_parent_records(&self, ids: &[HorseId]) -> StorageResult<Vec<HorseRef>> {
        self.record_lookup();
        let served = self.parent_lookups.fetch_add(1, Ordering::SeqCst);
        let over_budget = self
            .parent_lookup_budget
            .lock()
            .map(|budget| budget.is_some_and(|limit| served >= limit))
            .unwrap_or(false);
        if over_budget || self.fail_parent_lookups.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "Database connection failed".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.horses.get(id))
            .map(HorseRef::from)
            .collect())
    }
}

#[async_trait]
impl CompetitionLookup for MemoryStudbook {
    async fn find_competition_results(
        &self,
        ancestor_ids: &[HorseId],
    ) -> StorageResult<Vec<CompetitionRecord>> {
        self.record_lookup();
        if self.fail_competition_lookups.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(
                "competition results query timed out".to_string(),
            ));
        }
        Ok(ancestor_ids
            .iter()
            .filter_map(|id| self.results.get(id))
            .flat_map(|records| records.iter().cloned())
            .collect())
    }
}
