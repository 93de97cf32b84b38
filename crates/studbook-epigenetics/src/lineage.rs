//! Discipline specialization across the combined ancestry of a pair.
//!
//! Results are tallied for the ancestor group as a whole. A specialization
//! needs both a dominant discipline and several ancestors behind it, so a
//! single prolific ancestor cannot mark the whole lineage.

use futures::future::try_join_all;
use studbook_state::{CompetitionLookup, CompetitionRecord, HorseId, HorseLookup};

use crate::ancestry::{AncestorSet, AncestorWalker};
use crate::config::EngineConfig;
use crate::domain::{AnalysisFailure, AnalysisResult, AnalysisStage, LineageAnalysis};

/// Per-discipline counts in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisciplineTally {
    counts: Vec<(String, u64)>,
    total: u64,
}

impl DisciplineTally {
    pub fn record(&mut self, record: &CompetitionRecord) {
        self.total += 1;
        match self
            .counts
            .iter_mut()
            .find(|(discipline, _)| *discipline == record.discipline)
        {
            Some((_, count)) => *count += 1,
            None => self.counts.push((record.discipline.clone(), 1)),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Most frequent discipline; ties go to the one tallied first.
    pub fn dominant(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (discipline, count) in &self.counts {
            if best.map_or(true, |(_, top)| *count > top) {
                best = Some((discipline.as_str(), *count));
            }
        }
        best
    }

    /// Share of all records held by the dominant discipline, 0 when empty.
    pub fn strength(&self) -> f64 {
        match self.dominant() {
            Some((_, count)) if self.total > 0 => count as f64 / self.total as f64,
            _ => 0.0,
        }
    }
}

/// Measures how strongly the shared ancestry leans to one discipline.
pub struct LineageAnalyzer<'a> {
    walker: AncestorWalker<'a>,
    competitions: &'a dyn CompetitionLookup,
    config: &'a EngineConfig,
}

impl<'a> LineageAnalyzer<'a> {
    pub fn new(
        horses: &'a dyn HorseLookup,
        competitions: &'a dyn CompetitionLookup,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            walker: AncestorWalker::new(horses),
            competitions,
            config,
        }
    }

    /// Analyze the combined ancestry of `sire_id` and `dam_id`.
    pub async fn analyze(
        &self,
        sire_id: HorseId,
        dam_id: HorseId,
    ) -> AnalysisResult<LineageAnalysis> {
        let ancestors = self.combined_ancestors(sire_id, dam_id).await?;
        let histories = self.histories(&ancestors).await?;

        let mut tally = DisciplineTally::default();
        let mut contributing = 0u64;
        for history in &histories {
            if !history.is_empty() {
                contributing += 1;
            }
            for record in history {
                tally.record(record);
            }
        }

        Ok(self.summarize(&tally, contributing))
    }

    fn summarize(&self, tally: &DisciplineTally, contributing: u64) -> LineageAnalysis {
        let strength = tally.strength();
        let specialized = strength > self.config.specialization_threshold
            && contributing >= self.config.min_contributing_ancestors as u64;

        LineageAnalysis {
            discipline_specialization: specialized,
            specialized_discipline: if specialized {
                tally.dominant().map(|(discipline, _)| discipline.to_string())
            } else {
                None
            },
            specialization_strength: strength,
            total_competitions: tally.total(),
            contributing_ancestors: contributing,
        }
    }

    /// Sire-side ancestors followed by the dam-side ones not already seen.
    async fn combined_ancestors(
        &self,
        sire_id: HorseId,
        dam_id: HorseId,
    ) -> AnalysisResult<AncestorSet> {
        let depth = self.config.max_depth;
        let mut sire_side = self.walker.walk(sire_id, depth).await;
        if let Some(e) = sire_side.failure.take() {
            return Err(lineage_failure(format!("ancestry of horse {sire_id}: {e}")));
        }
        if sire_id == dam_id {
            return Ok(sire_side.ancestors);
        }

        let mut dam_side = self.walker.walk(dam_id, depth).await;
        if let Some(e) = dam_side.failure.take() {
            return Err(lineage_failure(format!("ancestry of horse {dam_id}: {e}")));
        }

        let mut combined = sire_side.ancestors;
        combined.extend_from(&dam_side.ancestors);
        Ok(combined)
    }

    /// Competition history of each ancestor, in ancestor order.
    async fn histories(
        &self,
        ancestors: &AncestorSet,
    ) -> AnalysisResult<Vec<Vec<CompetitionRecord>>> {
        let ids: Vec<HorseId> = ancestors.ids().collect();
        try_join_all(
            ids.iter()
                .map(|id| self.competitions.find_competition_results(std::slice::from_ref(id))),
        )
        .await
        .map_err(|e| lineage_failure(format!("competition history: {e}")))
    }
}

fn lineage_failure(reason: String) -> AnalysisFailure {
    AnalysisFailure::new(AnalysisStage::Lineage, reason)
}
