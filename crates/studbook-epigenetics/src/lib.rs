//! Studbook Epigenetics
//!
//! Assigns heritable positive and negative traits to a foal at birth from
//! its parents' ancestry, the ancestors' competition history and the dam's
//! condition during gestation.
//!
//! ## Components
//!
//! - [`ancestry`]: bounded breadth-first walk over parent links
//! - [`inbreeding`]: ancestors shared by sire and dam
//! - [`lineage`]: dominant discipline across the combined ancestry
//! - [`conditions`]: mare stress and feed quality, explicit or derived
//! - [`rules`]: the ordered trait rule catalog
//! - [`engine`]: [`EpigeneticEngine::apply_epigenetic_traits_at_birth`]
//!
//! The engine reads through the `studbook-state` lookup traits and performs
//! no I/O of its own. Randomness comes from a per-call [`DrawSource`].

pub mod ancestry;
pub mod conditions;
pub mod config;
pub mod domain;
pub mod draw;
pub mod engine;
pub mod inbreeding;
pub mod lineage;
pub mod obs;
pub mod rules;
pub mod telemetry;

pub use ancestry::{AncestorSet, AncestorWalker, WalkOutcome};
pub use conditions::ConditionSnapshot;
pub use config::EngineConfig;
pub use domain::{
    AnalysisFailure, AnalysisResult, AnalysisStage, BirthTraits, BreedingAnalysis, BreedingData,
    EpigeneticsError, InbreedingResult, LineageAnalysis, Polarity, Result, TraitAssignment,
};
pub use draw::{DrawSource, RngDraws, ScriptedDraws};
pub use engine::EpigeneticEngine;
pub use inbreeding::InbreedingDetector;
pub use lineage::{DisciplineTally, LineageAnalyzer};
pub use obs::{
    breeding_span, emit_analysis_degraded, emit_birth_evaluated, emit_trait_applied, BreedingSpan,
};
pub use rules::{apply_rules, RuleContext, TraitRule};
pub use telemetry::init_tracing;

pub use studbook_state::{
    CompetitionLookup, CompetitionRecord, HealthStatus, HorseId, HorseLookup, HorseRecord,
    HorseRef, MemoryStudbook,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
