//! Typed breeding input.

use serde::{Deserialize, Serialize};
use studbook_state::HorseId;

use crate::domain::error::{EpigeneticsError, Result};

/// Inputs of one birth.
///
/// `sire_id` and `dam_id` are required by the engine but optional here so
/// that an incomplete request can be represented and rejected with a
/// validation error. `mare_stress` and `feed_quality` (0–100) override the
/// values otherwise derived from the dam's studbook record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedingData {
    #[serde(default, alias = "sireId")]
    pub sire_id: Option<HorseId>,
    #[serde(default, alias = "damId")]
    pub dam_id: Option<HorseId>,
    #[serde(default, alias = "mareStress")]
    pub mare_stress: Option<f64>,
    #[serde(default, alias = "feedQuality")]
    pub feed_quality: Option<f64>,
}

impl BreedingData {
    /// Breeding data for a sire/dam pair with no explicit conditions.
    pub fn new(sire_id: impl Into<HorseId>, dam_id: impl Into<HorseId>) -> Self {
        Self {
            sire_id: Some(sire_id.into()),
            dam_id: Some(dam_id.into()),
            ..Self::default()
        }
    }

    pub fn with_mare_stress(mut self, mare_stress: f64) -> Self {
        self.mare_stress = Some(mare_stress);
        self
    }

    pub fn with_feed_quality(mut self, feed_quality: f64) -> Self {
        self.feed_quality = Some(feed_quality);
        self
    }

    /// Both parent ids, or `MissingParents`.
    pub fn parents(&self) -> Result<(HorseId, HorseId)> {
        match (self.sire_id, self.dam_id) {
            (Some(sire), Some(dam)) => Ok((sire, dam)),
            _ => Err(EpigeneticsError::MissingParents),
        }
    }
}
