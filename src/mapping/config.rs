//! Configuration for semantic matching

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the semantic matcher.
///
/// The defaults define three non-overlapping confidence bands: exact
/// matches at 1.0, ontology-hinted matches at 0.85-0.95, and lexical
/// matches inside [0.3, 0.75]. Changing a value must not make a lower tier
/// overlap a higher tier's minimum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Global confidence floor; candidates below it are discarded
    pub min_confidence: f64,
    /// Base confidence for ontology-hinted matches
    pub hint_confidence: f64,
    /// Boost applied when the source unit agrees with the hinted term's unit
    pub unit_boost: f64,
    /// Upper cap for boosted ontology-hinted matches
    pub hint_cap: f64,
    /// Minimum token-overlap ratio for a lexical candidate
    pub lexical_min_ratio: f64,
    /// Lower bound of the lexical confidence band
    pub lexical_floor: f64,
    /// Upper bound of the lexical confidence band
    pub lexical_ceiling: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            hint_confidence: 0.85,
            unit_boost: 0.05,
            hint_cap: 0.95,
            lexical_min_ratio: 0.3,
            lexical_floor: 0.3,
            lexical_ceiling: 0.75,
        }
    }
}

impl MapperConfig {
    /// Create a config with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// A config that only accepts exact matches
    pub fn strict() -> Self {
        Self {
            min_confidence: 1.0,
            ..Self::default()
        }
    }

    /// Set the global confidence floor
    pub fn with_min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set the base confidence for ontology-hinted matches
    pub fn with_hint_confidence(mut self, confidence: f64) -> Self {
        self.hint_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum token-overlap ratio for lexical candidates
    pub fn with_lexical_min_ratio(mut self, ratio: f64) -> Self {
        self.lexical_min_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Map a token-overlap ratio into the lexical confidence band.
    ///
    /// Ratios at the minimum land on the band floor; a full overlap lands
    /// on the band ceiling.
    pub(crate) fn lexical_confidence(&self, ratio: f64) -> f64 {
        let span = 1.0 - self.lexical_min_ratio;
        if span <= 0.0 {
            return self.lexical_floor;
        }
        let scaled = (ratio - self.lexical_min_ratio) / span;
        self.lexical_floor + scaled * (self.lexical_ceiling - self.lexical_floor)
    }
}
