//! Trait rule catalog and its evaluation.
//!
//! [`TraitRule::CATALOG`] is a fixed, ordered table. [`apply_rules`] walks it
//! once per birth: every rule whose predicate holds takes exactly one sample
//! from the [`DrawSource`] and applies its trait when the sample is strictly
//! below the rule's probability. Rules are independent; there is no early
//! exit. The order only fixes which sample each rule receives.

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionSnapshot;
use crate::domain::{InbreedingResult, LineageAnalysis, Polarity, TraitAssignment};
use crate::draw::DrawSource;
use crate::obs::emit_trait_applied;

/// Specialization strength the `specialized_lineage` rule requires.
pub const SPECIALIZED_LINEAGE_MIN_STRENGTH: f64 = 0.6;

/// Evidence a rule predicate is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub conditions: &'a ConditionSnapshot,
    pub lineage: &'a LineageAnalysis,
    pub inbreeding: &'a InbreedingResult,
}

/// A heritable trait rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitRule {
    /// Calm, well-fed mare.
    Hardy,
    /// Good conditions and no shared ancestry.
    WellBred,
    /// Exceptional conditions.
    PremiumCare,
    /// Ancestry dominated by one discipline.
    SpecializedLineage,
    /// Parents share an ancestor.
    Inbred,
    /// Stressed and underfed mare.
    WeakConstitution,
    /// Stressed mare.
    StressedLineage,
    /// Very poor feed.
    PoorNutrition,
}

impl TraitRule {
    /// Evaluation order.
    pub const CATALOG: [TraitRule; 8] = [
        TraitRule::Hardy,
        TraitRule::WellBred,
        TraitRule::PremiumCare,
        TraitRule::SpecializedLineage,
        TraitRule::Inbred,
        TraitRule::WeakConstitution,
        TraitRule::StressedLineage,
        TraitRule::PoorNutrition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraitRule::Hardy => "hardy",
            TraitRule::WellBred => "well_bred",
            TraitRule::PremiumCare => "premium_care",
            TraitRule::SpecializedLineage => "specialized_lineage",
            TraitRule::Inbred => "inbred",
            TraitRule::WeakConstitution => "weak_constitution",
            TraitRule::StressedLineage => "stressed_lineage",
            TraitRule::PoorNutrition => "poor_nutrition",
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            TraitRule::Hardy
            | TraitRule::WellBred
            | TraitRule::PremiumCare
            | TraitRule::SpecializedLineage => Polarity::Positive,
            TraitRule::Inbred
            | TraitRule::WeakConstitution
            | TraitRule::StressedLineage
            | TraitRule::PoorNutrition => Polarity::Negative,
        }
    }

    /// Chance the trait is applied once the predicate holds, in (0, 1].
    pub fn probability(self) -> f64 {
        match self {
            TraitRule::Hardy => 0.25,
            TraitRule::WellBred => 0.20,
            TraitRule::PremiumCare => 0.15,
            TraitRule::SpecializedLineage => 0.30,
            TraitRule::Inbred => 0.60,
            TraitRule::WeakConstitution => 0.35,
            TraitRule::StressedLineage => 0.25,
            TraitRule::PoorNutrition => 0.40,
        }
    }

    /// Whether the rule is eligible for this birth.
    pub fn holds(self, ctx: &RuleContext<'_>) -> bool {
        let c = ctx.conditions;
        match self {
            TraitRule::Hardy => c.stress_at_most(20.0) && c.feed_at_least(80.0),
            TraitRule::WellBred => {
                c.stress_at_most(30.0)
                    && c.feed_at_least(70.0)
                    && !ctx.inbreeding.inbreeding_detected()
            }
            TraitRule::PremiumCare => c.stress_at_most(10.0) && c.feed_at_least(90.0),
            TraitRule::SpecializedLineage => {
                ctx.lineage.discipline_specialization
                    && ctx.lineage.specialization_strength > SPECIALIZED_LINEAGE_MIN_STRENGTH
            }
            TraitRule::Inbred => ctx.inbreeding.inbreeding_detected(),
            TraitRule::WeakConstitution => c.stress_at_least(70.0) && c.feed_at_most(40.0),
            TraitRule::StressedLineage => c.stress_at_least(60.0),
            TraitRule::PoorNutrition => c.feed_at_most(30.0),
        }
    }

    /// Whether `sample` applies the trait. Equality does not.
    pub fn fires(self, sample: f64) -> bool {
        sample < self.probability()
    }
}

/// Evaluate the catalog against `ctx`, drawing from `draws`.
pub fn apply_rules(ctx: &RuleContext<'_>, draws: &mut dyn DrawSource) -> TraitAssignment {
    let mut traits = TraitAssignment::default();

    for rule in TraitRule::CATALOG {
        if !rule.holds(ctx) {
            continue;
        }
        let sample = draws.next_sample();
        if rule.fires(sample) && traits.insert(rule.polarity(), rule.name()) {
            emit_trait_applied(rule.name(), rule.polarity(), rule.probability());
        }
    }

    traits
}
