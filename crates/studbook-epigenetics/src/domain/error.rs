//! Error taxonomy for the epigenetic trait engine.
//!
//! Only the variants of [`EpigeneticsError`] ever reach a caller. Collaborator
//! failures during ancestry and lineage analysis are carried as
//! [`AnalysisFailure`](crate::domain::AnalysisFailure) instead and replaced by
//! conservative defaults.

use studbook_state::{HorseId, StorageError};

/// Fatal errors of `apply_epigenetic_traits_at_birth`.
#[derive(Debug, thiserror::Error)]
pub enum EpigeneticsError {
    /// Either parent id was absent from the breeding data.
    #[error("Both sireId and damId are required")]
    MissingParents,

    /// The dam has no studbook record.
    #[error("Mare with ID {id} not found")]
    MareNotFound { id: HorseId },

    /// The dam's record could not be read at all.
    ///
    /// Unlike the ancestry lookups, this one has no safe default: without
    /// the dam there are no breeding conditions, and inventing them would
    /// decide every condition-based trait on made-up data.
    #[error("failed to load mare {id}: {source}")]
    MareLookup {
        id: HorseId,
        #[source]
        source: StorageError,
    },
}

impl EpigeneticsError {
    /// Whether the error was raised before any collaborator was consulted.
    pub fn is_validation(&self) -> bool {
        matches!(self, EpigeneticsError::MissingParents)
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EpigeneticsError>;
