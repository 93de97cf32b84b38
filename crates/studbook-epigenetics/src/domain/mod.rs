//! Domain models for the epigenetic trait engine.
//!
//! Canonical definitions for the per-birth entities:
//! - `BreedingData`: typed input of one birth
//! - `InbreedingResult` / `LineageAnalysis`: ancestry evidence
//! - `BreedingAnalysis`: everything the rules were evaluated against
//! - `TraitAssignment` / `BirthTraits`: the result handed back to the caller

pub mod analysis;
pub mod assignment;
pub mod breeding;
pub mod error;

// Re-export main types and errors
pub use analysis::{
    AnalysisFailure, AnalysisResult, AnalysisStage, BreedingAnalysis, InbreedingResult,
    LineageAnalysis,
};
pub use assignment::{BirthTraits, Polarity, TraitAssignment};
pub use breeding::BreedingData;
pub use error::{EpigeneticsError, Result};
