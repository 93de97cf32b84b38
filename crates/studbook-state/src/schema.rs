//! Record definitions for the studbook
//!
//! Records:
//! - horses: identity, parent links and the mare-condition proxies
//! - competition results: one historical placement in a discipline
//!
//! Field names follow the persisted column names (`sire_id`, `stress_level`, ...).

use serde::{Deserialize, Serialize};

/// Stable identifier of a horse in the studbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HorseId(pub u64);

impl std::fmt::Display for HorseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HorseId {
    fn from(id: u64) -> Self {
        HorseId(id)
    }
}

/// Persisted health classification of a horse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(alias = "excellent")]
    Excellent,
    #[serde(alias = "good")]
    Good,
    #[serde(alias = "fair")]
    Fair,
    #[serde(alias = "poor")]
    Poor,
    #[serde(alias = "bad")]
    Bad,
    #[serde(other)]
    Unknown,
}

/// A node in the ancestry graph: identity plus parent links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseRef {
    pub id: HorseId,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "sire_id")]
    pub sire_id: Option<HorseId>,
    #[serde(default, alias = "dam_id")]
    pub dam_id: Option<HorseId>,
}

impl HorseRef {
    /// A node with no name and no known parents.
    pub fn bare(id: HorseId) -> Self {
        Self {
            id,
            name: String::new(),
            sire_id: None,
            dam_id: None,
        }
    }

    /// Parent ids that are set, sire first.
    pub fn parent_ids(&self) -> impl Iterator<Item = HorseId> {
        self.sire_id.into_iter().chain(self.dam_id)
    }
}

/// A horse as persisted, including the condition fields read for a mare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseRecord {
    pub id: HorseId,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "sireId")]
    pub sire_id: Option<HorseId>,
    #[serde(default, alias = "damId")]
    pub dam_id: Option<HorseId>,
    /// Persisted stress, 0 (calm) to 100 (distressed)
    #[serde(default, alias = "stressLevel")]
    pub stress_level: Option<f64>,
    /// Bond with the handler, 0 to 100
    #[serde(default, alias = "bondScore")]
    pub bond_score: Option<f64>,
    #[serde(default, alias = "healthStatus")]
    pub health_status: Option<HealthStatus>,
    #[serde(default, alias = "totalEarnings")]
    pub total_earnings: Option<f64>,
}

impl HorseRecord {
    /// Create a record with identity only; condition fields are unset.
    pub fn new(id: impl Into<HorseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sire_id: None,
            dam_id: None,
            stress_level: None,
            bond_score: None,
            health_status: None,
            total_earnings: None,
        }
    }

    /// Set both parent links (builder pattern).
    pub fn with_parents(mut self, sire_id: Option<u64>, dam_id: Option<u64>) -> Self {
        self.sire_id = sire_id.map(HorseId);
        self.dam_id = dam_id.map(HorseId);
        self
    }

    /// Set the mare-condition proxies (builder pattern).
    pub fn with_condition(
        mut self,
        stress_level: f64,
        bond_score: f64,
        health_status: HealthStatus,
    ) -> Self {
        self.stress_level = Some(stress_level);
        self.bond_score = Some(bond_score);
        self.health_status = Some(health_status);
        self
    }

    /// Set lifetime earnings (builder pattern).
    pub fn with_earnings(mut self, total_earnings: f64) -> Self {
        self.total_earnings = Some(total_earnings);
        self
    }
}

impl From<&HorseRecord> for HorseRef {
    fn from(record: &HorseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            sire_id: record.sire_id,
            dam_id: record.dam_id,
        }
    }
}

/// One historical competition result attributable to a horse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionRecord {
    /// Competitive category, e.g. "Racing" or "Dressage"
    pub discipline: String,
    /// Placement as recorded, e.g. "1st"
    pub placement: String,
}

impl CompetitionRecord {
    pub fn new(discipline: impl Into<String>, placement: impl Into<String>) -> Self {
        Self {
            discipline: discipline.into(),
            placement: placement.into(),
        }
    }
}
