//! Observability tests for birth tracing.
//!
//! These tests verify that structured tracing events are emitted for the
//! key points of a birth: trait application, degraded analyses and the
//! birth-scoped span.

use std::sync::Arc;

use studbook_epigenetics::{
    emit_analysis_degraded, emit_birth_evaluated, emit_trait_applied, AnalysisFailure,
    AnalysisStage, BreedingAnalysis, BreedingData, BreedingSpan, EpigeneticEngine, HealthStatus,
    HorseId, HorseRecord, MemoryStudbook, Polarity, ScriptedDraws, TraitAssignment,
};
use tracing_test::traced_test;

/// Test: emit_trait_applied creates an info-level event
#[traced_test]
#[test]
fn test_emit_trait_applied_logs_name_and_polarity() {
    emit_trait_applied("stressed_lineage", Polarity::Negative, 0.25);

    assert!(logs_contain("Applied negative trait: stressed_lineage"));
    assert!(logs_contain("trait.applied"));
}

/// Test: emit_analysis_degraded creates a warn-level event
#[traced_test]
#[test]
fn test_emit_analysis_degraded_logs_stage() {
    let failure = AnalysisFailure::new(AnalysisStage::Lineage, "query timed out");
    emit_analysis_degraded(&failure);

    assert!(logs_contain("WARN"));
    assert!(logs_contain("lineage analysis failed: query timed out"));
}

/// Test: emit_birth_evaluated is a debug-level summary
#[traced_test]
#[test]
fn test_emit_birth_evaluated_logs_summary() {
    emit_birth_evaluated(&BreedingAnalysis::default(), &TraitAssignment::default());

    assert!(logs_contain("birth.evaluated"));
}

/// Test: BreedingSpan::enter creates an entered span without panicking
#[traced_test]
#[test]
fn test_breeding_span_enter_creates_span() {
    let span = BreedingSpan::enter(HorseId(1), HorseId(2));
    emit_trait_applied("hardy", Polarity::Positive, 0.25);
    drop(span);

    assert!(logs_contain("studbook.birth"));
}

/// Test: a full birth runs inside a span carrying both parent ids
#[traced_test]
#[tokio::test]
async fn test_birth_events_carry_parent_ids() {
    let mut studbook = MemoryStudbook::new();
    studbook.insert_horse(HorseRecord::new(41, "Sire"));
    studbook.insert_horse(
        HorseRecord::new(42, "Dam").with_condition(15.0, 85.0, HealthStatus::Excellent),
    );
    let studbook = Arc::new(studbook);
    let engine = EpigeneticEngine::new(studbook.clone(), studbook);

    let data = BreedingData::new(41, 42)
        .with_mare_stress(15.0)
        .with_feed_quality(85.0);
    engine
        .apply_epigenetic_traits_at_birth(&data, &mut ScriptedDraws::new([0.01]))
        .await
        .unwrap();

    assert!(logs_contain("sire_id=41"));
    assert!(logs_contain("dam_id=42"));
    assert!(logs_contain("Applied positive trait: hardy"));
}

/// Test: a birth with no applied traits emits no trait events
#[traced_test]
#[tokio::test]
async fn test_no_trait_events_when_nothing_applies() {
    let mut studbook = MemoryStudbook::new();
    studbook.insert_horse(HorseRecord::new(1, "Sire"));
    studbook.insert_horse(HorseRecord::new(2, "Dam"));
    let studbook = Arc::new(studbook);
    let engine = EpigeneticEngine::new(studbook.clone(), studbook);

    let data = BreedingData::new(1, 2)
        .with_mare_stress(40.0)
        .with_feed_quality(50.0);
    let birth = engine
        .apply_epigenetic_traits_at_birth(&data, &mut ScriptedDraws::constant(0.0))
        .await
        .unwrap();

    assert!(birth.traits.is_empty());
    assert!(!logs_contain("trait.applied"));
}
