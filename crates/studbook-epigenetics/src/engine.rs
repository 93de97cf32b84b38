//! Entry point: assign epigenetic traits to a foal at birth.
//!
//! Flow: validate the pair, load the dam, resolve the conditions, run the
//! inbreeding and lineage analyses concurrently, fall back to conservative
//! defaults for any analysis that failed, evaluate the trait rules.

use std::sync::Arc;

use studbook_state::{CompetitionLookup, HorseId, HorseLookup};
use tracing::Instrument;

use crate::conditions::ConditionSnapshot;
use crate::config::EngineConfig;
use crate::domain::{
    AnalysisFailure, AnalysisResult, BirthTraits, BreedingAnalysis, BreedingData,
    EpigeneticsError, LineageAnalysis, Result,
};
use crate::draw::{DrawSource, RngDraws};
use crate::inbreeding::InbreedingDetector;
use crate::lineage::LineageAnalyzer;
use crate::obs::{breeding_span, emit_analysis_degraded, emit_birth_evaluated};
use crate::rules::{apply_rules, RuleContext};

/// The epigenetic trait engine.
///
/// Holds only its collaborators and configuration; every birth builds its
/// own intermediate state, so one engine can serve concurrent births.
pub struct EpigeneticEngine {
    horses: Arc<dyn HorseLookup>,
    competitions: Arc<dyn CompetitionLookup>,
    config: EngineConfig,
}

impl EpigeneticEngine {
    pub fn new(horses: Arc<dyn HorseLookup>, competitions: Arc<dyn CompetitionLookup>) -> Self {
        Self::with_config(horses, competitions, EngineConfig::default())
    }

    pub fn with_config(
        horses: Arc<dyn HorseLookup>,
        competitions: Arc<dyn CompetitionLookup>,
        config: EngineConfig,
    ) -> Self {
        Self {
            horses,
            competitions,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assign traits to the foal of `data.sire_id` and `data.dam_id`.
    ///
    /// Fails only when a parent id is missing (before any lookup), when the
    /// dam has no record, or when the dam lookup itself fails. Lookup
    /// failures during the ancestry analyses degrade the evidence to "no
    /// inbreeding, no specialization" and are listed in
    /// [`BreedingAnalysis::degraded`]. A horse mated with itself stays
    /// inbred even then.
    pub async fn apply_epigenetic_traits_at_birth(
        &self,
        data: &BreedingData,
        draws: &mut dyn DrawSource,
    ) -> Result<BirthTraits> {
        let (sire_id, dam_id) = data.parents()?;
        self.evaluate(data, sire_id, dam_id, draws)
            .instrument(breeding_span(sire_id, dam_id))
            .await
    }

    /// [`apply_epigenetic_traits_at_birth`](Self::apply_epigenetic_traits_at_birth)
    /// with a fresh OS-seeded generator.
    pub async fn apply_epigenetic_traits_at_birth_with_entropy(
        &self,
        data: &BreedingData,
    ) -> Result<BirthTraits> {
        let mut draws = RngDraws::from_entropy();
        self.apply_epigenetic_traits_at_birth(data, &mut draws).await
    }

    async fn evaluate(
        &self,
        data: &BreedingData,
        sire_id: HorseId,
        dam_id: HorseId,
        draws: &mut dyn DrawSource,
    ) -> Result<BirthTraits> {
        let mare = self
            .horses
            .get_horse_by_id(dam_id)
            .await
            .map_err(|source| EpigeneticsError::MareLookup { id: dam_id, source })?
            .ok_or(EpigeneticsError::MareNotFound { id: dam_id })?;
        let conditions = ConditionSnapshot::resolve(data, &mare);

        let detector = InbreedingDetector::new(self.horses.as_ref(), self.config.max_depth);
        let analyzer = LineageAnalyzer::new(
            self.horses.as_ref(),
            self.competitions.as_ref(),
            &self.config,
        );
        let (inbreeding, lineage) = tokio::join!(
            detector.detect(sire_id, dam_id),
            analyzer.analyze(sire_id, dam_id)
        );

        let mut degraded = Vec::new();
        let inbreeding = or_fallback(inbreeding, &mut degraded, || {
            InbreedingDetector::fallback(sire_id, dam_id)
        });
        let lineage = or_fallback(lineage, &mut degraded, LineageAnalysis::default);
        let analysis = BreedingAnalysis {
            inbreeding,
            lineage,
            conditions,
            degraded,
        };

        let traits = apply_rules(
            &RuleContext {
                conditions: &analysis.conditions,
                lineage: &analysis.lineage,
                inbreeding: &analysis.inbreeding,
            },
            draws,
        );
        emit_birth_evaluated(&analysis, &traits);

        Ok(BirthTraits {
            traits,
            breeding_analysis: analysis,
        })
    }
}

/// Unwrap an analysis, or log the failure, record it and use `fallback`.
fn or_fallback<T>(
    result: AnalysisResult<T>,
    degraded: &mut Vec<AnalysisFailure>,
    fallback: impl FnOnce() -> T,
) -> T {
    result.unwrap_or_else(|failure| {
        emit_analysis_degraded(&failure);
        degraded.push(failure);
        fallback()
    })
}
