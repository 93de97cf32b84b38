//! Trait assignment returned for a newborn.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::BreedingAnalysis;

/// Direction of a heritable trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// Positive and negative traits applied at birth.
///
/// Each list holds a trait at most once, in rule catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitAssignment {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl TraitAssignment {
    /// Record a trait. Returns `false` if it was already present.
    pub fn insert(&mut self, polarity: Polarity, name: &str) -> bool {
        let list = match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        };
        if list.iter().any(|t| t == name) {
            return false;
        }
        list.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positive.iter().chain(&self.negative).any(|t| t == name)
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }
}

/// Output of `apply_epigenetic_traits_at_birth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthTraits {
    pub traits: TraitAssignment,
    pub breeding_analysis: BreedingAnalysis,
}
