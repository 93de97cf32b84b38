//! Evidence produced by the ancestry and lineage analyses.

use serde::{Deserialize, Serialize};
use studbook_state::HorseRef;

use crate::conditions::ConditionSnapshot;

/// Shared-ancestor evidence for a sire/dam pair.
///
/// The fields are private so that `inbreeding_detected` always agrees with
/// the ancestor list. Deserialization recomputes the flag from the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "InbreedingPayload")]
pub struct InbreedingResult {
    inbreeding_detected: bool,
    common_ancestors: Vec<HorseRef>,
}

/// Wire form of [`InbreedingResult`]; any incoming flag is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InbreedingPayload {
    #[serde(default)]
    common_ancestors: Vec<HorseRef>,
}

impl From<InbreedingPayload> for InbreedingResult {
    fn from(payload: InbreedingPayload) -> Self {
        Self::from_common(payload.common_ancestors)
    }
}

impl InbreedingResult {
    pub fn from_common(common_ancestors: Vec<HorseRef>) -> Self {
        Self {
            inbreeding_detected: !common_ancestors.is_empty(),
            common_ancestors,
        }
    }

    pub fn inbreeding_detected(&self) -> bool {
        self.inbreeding_detected
    }

    /// Ancestors present on both sides, in sire-side discovery order.
    pub fn common_ancestors(&self) -> &[HorseRef] {
        &self.common_ancestors
    }
}

/// Discipline specialization across the combined ancestry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageAnalysis {
    pub discipline_specialization: bool,
    pub specialized_discipline: Option<String>,
    /// Share of all results held by the most frequent discipline, in [0, 1]
    pub specialization_strength: f64,
    pub total_competitions: u64,
    /// Ancestors with at least one recorded result
    pub contributing_ancestors: u64,
}

/// Analysis stage whose collaborator failure was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Inbreeding,
    Lineage,
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStage::Inbreeding => write!(f, "inbreeding"),
            AnalysisStage::Lineage => write!(f, "lineage"),
        }
    }
}

/// A collaborator failure inside one analysis stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub stage: AnalysisStage,
    pub reason: String,
}

impl AnalysisFailure {
    pub fn new(stage: AnalysisStage, reason: impl std::fmt::Display) -> Self {
        Self {
            stage,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} analysis failed: {}", self.stage, self.reason)
    }
}

/// Result of one analysis stage: the evidence, or the failure that stopped it.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisFailure>;

/// Caller-facing evidence behind a trait assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingAnalysis {
    pub inbreeding: InbreedingResult,
    pub lineage: LineageAnalysis,
    pub conditions: ConditionSnapshot,
    /// Stages that fell back to defaults after a collaborator failure
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<AnalysisFailure>,
}

impl BreedingAnalysis {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
