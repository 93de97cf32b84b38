//! Structured observability hooks for births.
//!
//! This module provides:
//! - A birth-scoped tracing span via the `BreedingSpan` RAII guard
//! - Emission functions for trait application, degraded analyses and the
//!   per-birth summary
//!
//! Filter with `RUST_LOG`; see [`crate::telemetry::init_tracing`].

use studbook_state::HorseId;
use tracing::{debug, info, warn};

use crate::domain::{AnalysisFailure, BreedingAnalysis, Polarity, TraitAssignment};

/// RAII guard that enters a birth-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = BreedingSpan::enter(sire_id, dam_id);
/// // every event below carries sire_id and dam_id
/// ```
pub struct BreedingSpan {
    _span: tracing::span::EnteredSpan,
}

impl BreedingSpan {
    /// Create and enter a span tagged with both parent ids.
    pub fn enter(sire_id: HorseId, dam_id: HorseId) -> Self {
        Self {
            _span: breeding_span(sire_id, dam_id).entered(),
        }
    }
}

/// The span a birth runs in, for callers that instrument futures.
pub fn breeding_span(sire_id: HorseId, dam_id: HorseId) -> tracing::Span {
    tracing::info_span!("studbook.birth", sire_id = %sire_id, dam_id = %dam_id)
}

/// Emit event: a trait rule fired and its trait was applied.
pub fn emit_trait_applied(name: &str, polarity: Polarity, probability: f64) {
    info!(
        event = "trait.applied",
        trait_name = %name,
        polarity = %polarity,
        probability = probability,
        "Applied {polarity} trait: {name}"
    );
}

/// Emit event: an analysis stage fell back to defaults (warning level).
pub fn emit_analysis_degraded(failure: &AnalysisFailure) {
    warn!(
        event = "analysis.degraded",
        stage = %failure.stage,
        error = %failure.reason,
        "{failure}; continuing with defaults"
    );
}

/// Emit event: summary of one completed birth.
pub fn emit_birth_evaluated(analysis: &BreedingAnalysis, traits: &TraitAssignment) {
    debug!(
        event = "birth.evaluated",
        inbreeding = analysis.inbreeding.inbreeding_detected(),
        common_ancestors = analysis.inbreeding.common_ancestors().len(),
        specialized = analysis.lineage.discipline_specialization,
        total_competitions = analysis.lineage.total_competitions,
        mare_stress = analysis.conditions.mare_stress,
        feed_quality = analysis.conditions.feed_quality,
        positive = traits.positive.len(),
        negative = traits.negative.len(),
    );
}
