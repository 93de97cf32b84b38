//! Shared-ancestor detection between a sire and a dam.

use studbook_state::{HorseId, HorseLookup, HorseRef};

use crate::ancestry::{AncestorWalker, WalkOutcome};
use crate::domain::{AnalysisFailure, AnalysisResult, AnalysisStage, InbreedingResult};

/// Intersects the sire-side and dam-side ancestor sets.
pub struct InbreedingDetector<'a> {
    walker: AncestorWalker<'a>,
    max_depth: usize,
}

impl<'a> InbreedingDetector<'a> {
    pub fn new(lookup: &'a dyn HorseLookup, max_depth: usize) -> Self {
        Self {
            walker: AncestorWalker::new(lookup),
            max_depth,
        }
    }

    /// Find the ancestors both parents share.
    ///
    /// A failed lookup on either side fails the whole detection; a partial
    /// ancestor set could hide or invent overlap. Mating a horse with itself
    /// is maximal inbreeding: the horse and all of its ancestors are common.
    pub async fn detect(
        &self,
        sire_id: HorseId,
        dam_id: HorseId,
    ) -> AnalysisResult<InbreedingResult> {
        if sire_id == dam_id {
            let outcome = self.complete_walk(sire_id).await?;
            let mut common = vec![outcome.root.unwrap_or_else(|| HorseRef::bare(sire_id))];
            common.extend(outcome.ancestors.iter().cloned());
            return Ok(InbreedingResult::from_common(common));
        }

        let (sire_side, dam_side) =
            futures::join!(self.complete_walk(sire_id), self.complete_walk(dam_id));
        let (sire_side, dam_side) = (sire_side?, dam_side?);

        Ok(InbreedingResult::from_common(
            sire_side.ancestors.intersection(&dam_side.ancestors),
        ))
    }

    /// Result to use when [`detect`](Self::detect) fails.
    ///
    /// Distinct parents fall back to "no shared ancestry". A horse mated
    /// with itself is still its own common ancestor, which needs no lookup.
    pub fn fallback(sire_id: HorseId, dam_id: HorseId) -> InbreedingResult {
        if sire_id == dam_id {
            InbreedingResult::from_common(vec![HorseRef::bare(sire_id)])
        } else {
            InbreedingResult::default()
        }
    }

    async fn complete_walk(&self, start_id: HorseId) -> AnalysisResult<WalkOutcome> {
        let mut outcome = self.walker.walk(start_id, self.max_depth).await;
        match outcome.failure.take() {
            Some(e) => Err(AnalysisFailure::new(
                AnalysisStage::Inbreeding,
                format!("ancestry of horse {start_id}: {e}"),
            )),
            None => Ok(outcome),
        }
    }
}
