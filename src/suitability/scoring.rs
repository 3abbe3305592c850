//! Per-rule partial-credit scoring
//!
//! Each factor earns its full weight on an exact match. Temperature and
//! humidity additionally earn half weight when the value misses the band but
//! sits within the table's tolerance of the band midpoint.

use crate::conditions::{Band, ConditionVector};
use crate::rules::{NearMissTolerance, ScoringRule, Weights};

/// How well one factor matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorMatch {
    /// Inside the band (or soil in the accepted set)
    Full,
    /// Outside the band but within tolerance of its midpoint
    NearMiss,
    Miss,
}

impl FactorMatch {
    pub fn credit(&self, weight: f64) -> f64 {
        match self {
            FactorMatch::Full => weight,
            FactorMatch::NearMiss => weight / 2.0,
            FactorMatch::Miss => 0.0,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, FactorMatch::Full)
    }
}

/// Classify a value against a band with a near-miss window
pub fn match_band(value: f64, band: &Band, tolerance: f64) -> FactorMatch {
    if band.contains(value) {
        FactorMatch::Full
    } else if band.distance_from_midpoint(value) <= tolerance {
        FactorMatch::NearMiss
    } else {
        FactorMatch::Miss
    }
}

/// Factor matches and weighted total for one rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleScore {
    pub soil: FactorMatch,
    pub temperature: FactorMatch,
    pub humidity: FactorMatch,
    /// Weighted sum in [0, 1]
    pub total: f64,
}

/// Score one rule against the conditions
pub fn score_rule(
    rule: &ScoringRule,
    conditions: &ConditionVector,
    weights: Weights,
    tolerance: NearMissTolerance,
) -> RuleScore {
    let soil = if rule.accepts_soil(&conditions.soil_type) {
        FactorMatch::Full
    } else {
        FactorMatch::Miss
    };
    let temperature = match_band(conditions.temperature, &rule.temperature, tolerance.temperature);
    let humidity = match_band(conditions.humidity, &rule.humidity, tolerance.humidity);

    // Summed in soil, temperature, humidity order so the all-match case lands on exactly 1.0
    let total = soil.credit(weights.soil)
        + temperature.credit(weights.temperature)
        + humidity.credit(weights.humidity);

    RuleScore {
        soil,
        temperature,
        humidity,
        total: total.min(1.0),
    }
}
