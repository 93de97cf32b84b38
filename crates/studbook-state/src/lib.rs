//! Studbook-State: read-only studbook lookups for the breeding simulation
//!
//! This crate provides the data layer consumed by the epigenetic trait
//! engine. It never writes: horses, parent links and competition history are
//! owned by the wider persistence layer and exposed here as snapshots.
//!
//! ## Layer 0 - Data
//!
//! Focus: typed records and backend-agnostic lookup traits.
//!
//! ## Key Components
//!
//! - `HorseLookup`: single-horse fetch plus batched parent-link lookup
//! - `CompetitionLookup`: batched competition history lookup
//! - `MemoryStudbook`: in-memory backend (tests, fixtures, the CLI)

mod error;
pub mod lookup_traits;
pub mod memory;
mod schema;

pub use error::StorageError;
pub use lookup_traits::{CompetitionLookup, HorseLookup, StorageResult};
pub use memory::{FixtureResult, MemoryStudbook, StudbookFixture};
pub use schema::{CompetitionRecord, HealthStatus, HorseId, HorseRecord, HorseRef};
