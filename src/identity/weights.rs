use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::attribute_model::NORMAL_WEIGHT;

/// Matching weight per attribute key.
///
/// Every key weighs [`NORMAL_WEIGHT`] unless overridden; a weight of `0`
/// removes the key from matching and hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeWeights {
    overrides: BTreeMap<String, f64>,
}

impl AttributeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: &str, weight: f64) -> Self {
        self.overrides.insert(key.to_string(), weight);
        self
    }

    pub fn weight_for(&self, key: &str) -> f64 {
        self.overrides.get(key).copied().unwrap_or(NORMAL_WEIGHT)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, f64)> {
        self.overrides.iter().map(|(key, weight)| (key.as_str(), *weight))
    }

    /// Highest reachable match sum for an identity holding `keys`.
    pub fn perfect_similarity<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> f64 {
        keys.into_iter()
            .map(|key| self.weight_for(key).max(0.0))
            .sum()
    }
}
