//! Immediate breeding conditions: mare stress and feed quality.
//!
//! Explicit inputs win. A missing or non-finite input is derived from the
//! dam's persisted record; the derivation is monotonic, so a mare in worse
//! persisted shape never derives lower stress or better feed. Values that
//! cannot be read as a score count as the worst score, never the best.

use serde::{Deserialize, Serialize};
use studbook_state::{HealthStatus, HorseRecord};

use crate::domain::BreedingData;

/// Stress assumed when the record carries none.
pub const DEFAULT_STRESS_LEVEL: f64 = 50.0;
/// Bond assumed when the record carries none.
pub const DEFAULT_BOND_SCORE: f64 = 50.0;
/// Base feed quality before health, bond and earnings adjustments.
pub const BASE_FEED_QUALITY: f64 = 40.0;
/// Cap on the feed-quality bonus from lifetime earnings.
pub const MAX_EARNINGS_BONUS: f64 = 15.0;

/// Worst stress on the 0–100 scale.
const WORST_STRESS: f64 = 100.0;
/// Worst feed quality on the 0–100 scale.
const WORST_FEED: f64 = 0.0;

/// Normalised conditions of one birth, both on a 0–100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSnapshot {
    pub mare_stress: f64,
    pub feed_quality: f64,
}

impl ConditionSnapshot {
    pub fn new(mare_stress: f64, feed_quality: f64) -> Self {
        Self {
            mare_stress: clamp_score(mare_stress, WORST_STRESS),
            feed_quality: clamp_score(feed_quality, WORST_FEED),
        }
    }

    /// Explicit breeding inputs, falling back to the mare's record per field.
    pub fn resolve(data: &BreedingData, mare: &HorseRecord) -> Self {
        Self::new(
            finite(data.mare_stress).unwrap_or_else(|| derived_stress(mare)),
            finite(data.feed_quality).unwrap_or_else(|| derived_feed_quality(mare)),
        )
    }

    pub fn stress_at_most(&self, limit: f64) -> bool {
        self.mare_stress <= limit
    }

    pub fn stress_at_least(&self, limit: f64) -> bool {
        self.mare_stress >= limit
    }

    pub fn feed_at_least(&self, limit: f64) -> bool {
        self.feed_quality >= limit
    }

    pub fn feed_at_most(&self, limit: f64) -> bool {
        self.feed_quality <= limit
    }
}

/// `stress_level + health penalty + (100 - bond) / 10`
pub fn derived_stress(mare: &HorseRecord) -> f64 {
    let stress = finite(mare.stress_level).unwrap_or(DEFAULT_STRESS_LEVEL);
    let bond = bond_score(mare);
    clamp_score(
        stress + health_stress_penalty(mare.health_status) + (100.0 - bond) * 0.1,
        WORST_STRESS,
    )
}

/// `40 + health bonus + bond / 5 + min(earnings / 10_000, 15)`
pub fn derived_feed_quality(mare: &HorseRecord) -> f64 {
    let bond = bond_score(mare);
    let earnings = finite(mare.total_earnings).unwrap_or(0.0).max(0.0);
    clamp_score(
        BASE_FEED_QUALITY
            + health_feed_bonus(mare.health_status)
            + bond * 0.2
            + (earnings / 10_000.0).min(MAX_EARNINGS_BONUS),
        WORST_FEED,
    )
}

fn bond_score(mare: &HorseRecord) -> f64 {
    finite(mare.bond_score)
        .unwrap_or(DEFAULT_BOND_SCORE)
        .clamp(0.0, 100.0)
}

/// `value`, unless it is absent, NaN or infinite.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn health_stress_penalty(status: Option<HealthStatus>) -> f64 {
    match status.unwrap_or(HealthStatus::Unknown) {
        HealthStatus::Excellent => 0.0,
        HealthStatus::Good => 5.0,
        HealthStatus::Fair | HealthStatus::Unknown => 10.0,
        HealthStatus::Poor => 20.0,
        HealthStatus::Bad => 30.0,
    }
}

fn health_feed_bonus(status: Option<HealthStatus>) -> f64 {
    match status.unwrap_or(HealthStatus::Unknown) {
        HealthStatus::Excellent => 20.0,
        HealthStatus::Good => 12.0,
        HealthStatus::Fair | HealthStatus::Unknown => 6.0,
        HealthStatus::Poor => 0.0,
        HealthStatus::Bad => -10.0,
    }
}

/// Clamp to 0–100; NaN and infinities become `worst`.
fn clamp_score(value: f64, worst: f64) -> f64 {
    if !value.is_finite() {
        return worst;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mare(stress: f64, bond: f64, health: HealthStatus, earnings: f64) -> HorseRecord {
        HorseRecord::new(2, "Mare")
            .with_condition(stress, bond, health)
            .with_earnings(earnings)
    }

    #[test]
    fn test_explicit_inputs_win() {
        let data = crate::domain::BreedingData::new(1, 2)
            .with_mare_stress(15.0)
            .with_feed_quality(85.0);
        let record = mare(80.0, 30.0, HealthStatus::Poor, 0.0);
        let snapshot = ConditionSnapshot::resolve(&data, &record);

        assert_eq!(snapshot, ConditionSnapshot::new(15.0, 85.0));
    }

    #[test]
    fn test_each_missing_input_falls_back_independently() {
        let data = crate::domain::BreedingData::new(1, 2).with_mare_stress(35.0);
        let record = mare(10.0, 90.0, HealthStatus::Excellent, 200_000.0);
        let snapshot = ConditionSnapshot::resolve(&data, &record);

        assert_eq!(snapshot.mare_stress, 35.0);
        assert_eq!(snapshot.feed_quality, derived_feed_quality(&record));
    }

    #[test]
    fn test_excellent_mare_derives_premium_conditions() {
        let record = mare(10.0, 90.0, HealthStatus::Excellent, 200_000.0);
        // 10 + 0 + 1
        assert!((derived_stress(&record) - 11.0).abs() < 1e-9);
        // 40 + 20 + 18 + 15
        assert!((derived_feed_quality(&record) - 93.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let record = HorseRecord::new(2, "Mare");
        // 50 + 10 + 5
        assert!((derived_stress(&record) - 65.0).abs() < 1e-9);
        // 40 + 6 + 10
        assert!((derived_feed_quality(&record) - 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_derivation_is_monotonic_in_every_field() {
        let healths = [
            HealthStatus::Excellent,
            HealthStatus::Good,
            HealthStatus::Fair,
            HealthStatus::Poor,
            HealthStatus::Bad,
        ];
        for pair in healths.windows(2) {
            let better = mare(30.0, 60.0, pair[0], 50_000.0);
            let worse = mare(30.0, 60.0, pair[1], 50_000.0);
            assert!(derived_stress(&worse) >= derived_stress(&better));
            assert!(derived_feed_quality(&worse) <= derived_feed_quality(&better));
        }

        let calm = mare(20.0, 60.0, HealthStatus::Good, 50_000.0);
        let tense = mare(40.0, 60.0, HealthStatus::Good, 50_000.0);
        assert!(derived_stress(&tense) > derived_stress(&calm));

        let bonded = mare(30.0, 90.0, HealthStatus::Good, 50_000.0);
        let distant = mare(30.0, 20.0, HealthStatus::Good, 50_000.0);
        assert!(derived_stress(&distant) > derived_stress(&bonded));
        assert!(derived_feed_quality(&distant) < derived_feed_quality(&bonded));

        let rich = mare(30.0, 60.0, HealthStatus::Good, 100_000.0);
        let poor = mare(30.0, 60.0, HealthStatus::Good, 1_000.0);
        assert!(derived_feed_quality(&poor) < derived_feed_quality(&rich));
    }

    #[test]
    fn test_scores_are_clamped() {
        let snapshot = ConditionSnapshot::new(140.0, -5.0);
        assert_eq!(snapshot, ConditionSnapshot::new(100.0, 0.0));

        let record = mare(95.0, 0.0, HealthStatus::Bad, 0.0);
        assert_eq!(derived_stress(&record), 100.0);
    }

    #[test]
    fn test_unreadable_scores_count_as_worst() {
        assert_eq!(
            ConditionSnapshot::new(f64::NAN, f64::NAN),
            ConditionSnapshot::new(100.0, 0.0)
        );
        assert_eq!(ConditionSnapshot::new(f64::NEG_INFINITY, 50.0).mare_stress, 100.0);
        assert_eq!(ConditionSnapshot::new(20.0, f64::INFINITY).feed_quality, 0.0);
    }

    #[test]
    fn test_non_finite_inputs_fall_back_to_record() {
        let data = crate::domain::BreedingData::new(1, 2)
            .with_mare_stress(f64::NAN)
            .with_feed_quality(f64::INFINITY);
        let record = mare(40.0, 50.0, HealthStatus::Fair, 0.0);
        let snapshot = ConditionSnapshot::resolve(&data, &record);

        assert_eq!(snapshot.mare_stress, derived_stress(&record));
        assert_eq!(snapshot.feed_quality, derived_feed_quality(&record));
        assert!(!snapshot.stress_at_most(20.0));
    }

    #[test]
    fn test_non_finite_record_fields_use_defaults() {
        let mut record = HorseRecord::new(2, "Mare");
        record.stress_level = Some(f64::NAN);
        record.bond_score = Some(f64::NAN);
        record.total_earnings = Some(f64::INFINITY);

        let empty = HorseRecord::new(2, "Mare");
        assert_eq!(derived_stress(&record), derived_stress(&empty));
        assert_eq!(derived_feed_quality(&record), derived_feed_quality(&empty));
    }

    #[test]
    fn test_predicates_are_inclusive() {
        let snapshot = ConditionSnapshot::new(20.0, 80.0);
        assert!(snapshot.stress_at_most(20.0));
        assert!(snapshot.stress_at_least(20.0));
        assert!(snapshot.feed_at_least(80.0));
        assert!(snapshot.feed_at_most(80.0));
        assert!(!snapshot.stress_at_most(19.9));
    }
}
