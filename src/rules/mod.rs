//! Rule tables
//!
//! A rule table is an immutable, ordered list of `ScoringRule`s plus the
//! weight partition and near-miss tolerances shared by every rule in it.
//! Tables are validated once when built; evaluation never re-checks them.
//!
//! ## Tables
//! - `crop_table.rs` - crop suitability rules (soil set, temperature/humidity bands)
//! - `yield_table.rs` - base yield per hectare and the multiplier/confidence bands
//! - `fertilizer_table.rs` - nutrient requirements and application schedules

pub mod crop_table;
pub mod yield_table;
pub mod fertilizer_table;

pub use crop_table::default_crop_table;

use crate::conditions::{Band, SoilType};
use crate::error::RuleTableError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Qualitative suitability label attached to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitabilityTier {
    Excellent,
    Good,
    Fair,
}

/// Weight partition across the three scored factors.
///
/// Must sum to 1.0 so a full match scores exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub soil: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl Weights {
    pub const fn new(soil: f64, temperature: f64, humidity: f64) -> Self {
        Self { soil, temperature, humidity }
    }

    pub fn total(&self) -> f64 {
        self.soil + self.temperature + self.humidity
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.4, 0.3, 0.3)
    }
}

/// Half-credit window around a band midpoint when the band itself is missed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearMissTolerance {
    /// °C
    pub temperature: f64,
    /// Percentage points
    pub humidity: f64,
}

impl Default for NearMissTolerance {
    fn default() -> Self {
        Self { temperature: 5.0, humidity: 10.0 }
    }
}

/// One entity's environmental tolerance
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRule {
    pub name: String,
    pub soil_types: SmallVec<[SoilType; 4]>,
    pub temperature: Band,
    pub humidity: Band,
    pub suitability: SuitabilityTier,
    pub yield_tier: String,
}

impl ScoringRule {
    pub fn new(
        name: impl Into<String>,
        soil_types: impl IntoIterator<Item = SoilType>,
        temperature: Band,
        humidity: Band,
        suitability: SuitabilityTier,
        yield_tier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            soil_types: soil_types.into_iter().collect(),
            temperature,
            humidity,
            suitability,
            yield_tier: yield_tier.into(),
        }
    }

    pub fn accepts_soil(&self, soil: &SoilType) -> bool {
        self.soil_types.iter().any(|s| s == soil)
    }
}

/// Validated, read-only rule table
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<ScoringRule>,
    weights: Weights,
    tolerance: NearMissTolerance,
    index: FxHashMap<String, usize>,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Rules in definition order
    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn tolerance(&self) -> NearMissTolerance {
        self.tolerance
    }

    pub fn get(&self, name: &str) -> Option<&ScoringRule> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects rules and checks table invariants on `build`
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<ScoringRule>,
    weights: Option<Weights>,
    tolerance: Option<NearMissTolerance>,
}

impl RuleTableBuilder {
    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn tolerance(mut self, tolerance: NearMissTolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn rule(mut self, rule: ScoringRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = ScoringRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<RuleTable, RuleTableError> {
        let weights = self.weights.unwrap_or_default();
        let tolerance = self.tolerance.unwrap_or_default();

        if ![weights.soil, weights.temperature, weights.humidity].iter().all(|w| w.is_finite()) {
            return Err(RuleTableError::NonFinite("weight"));
        }
        if !(tolerance.temperature.is_finite() && tolerance.humidity.is_finite()) {
            return Err(RuleTableError::NonFinite("tolerance"));
        }
        if weights.soil < 0.0 || weights.temperature < 0.0 || weights.humidity < 0.0 {
            return Err(RuleTableError::Negative("weight"));
        }
        if tolerance.temperature < 0.0 || tolerance.humidity < 0.0 {
            return Err(RuleTableError::Negative("tolerance"));
        }
        let total = weights.total();
        if (total - 1.0).abs() > 1e-9 {
            return Err(RuleTableError::WeightSum(total));
        }

        let mut index = FxHashMap::default();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(RuleTableError::EmptyName);
            }
            for (axis, band) in [("temperature", rule.temperature), ("humidity", rule.humidity)] {
                if !band.is_ordered() {
                    return Err(RuleTableError::InvertedBand {
                        rule: rule.name.clone(),
                        axis,
                        min: band.min,
                        max: band.max,
                    });
                }
            }
            if index.insert(rule.name.clone(), i).is_some() {
                return Err(RuleTableError::DuplicateName(rule.name.clone()));
            }
        }

        Ok(RuleTable {
            rules: self.rules,
            weights,
            tolerance,
            index,
        })
    }
}
