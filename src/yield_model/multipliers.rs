//! Yield multipliers and confidence
//!
//! Every variable falls into one of three tiers against its `MultiplierBand`.
//! Tier factors multiply together and the product is clamped to
//! [`MULTIPLIER_FLOOR`, `MULTIPLIER_CEILING`].

use crate::rules::yield_table::{
    MultiplierBand, BASE_CONFIDENCE, HUMIDITY, MULTIPLIER_CEILING, MULTIPLIER_FLOOR, SOIL_MOISTURE,
    TEMPERATURE,
};

/// Tier of one variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Optimal,
    /// Inside the acceptable range but outside the optimal one
    Shoulder,
    Poor,
}

impl MultiplierBand {
    pub fn tier(&self, value: f64) -> Tier {
        if self.optimal.contains(value) {
            Tier::Optimal
        } else if self.acceptable.contains(value) {
            Tier::Shoulder
        } else {
            Tier::Poor
        }
    }

    pub fn factor(&self, value: f64) -> f64 {
        match self.tier(value) {
            Tier::Optimal => self.optimal_factor,
            Tier::Shoulder => self.shoulder_factor,
            Tier::Poor => self.poor_factor,
        }
    }
}

/// Resolved inputs after defaults are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInputs {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

impl ResolvedInputs {
    /// Missing values default to the midpoint of each optimal band
    pub fn resolve(temperature: Option<f64>, humidity: Option<f64>, soil_moisture: Option<f64>) -> Self {
        Self {
            temperature: temperature.unwrap_or(TEMPERATURE.default_value),
            humidity: humidity.unwrap_or(HUMIDITY.default_value),
            soil_moisture: soil_moisture.unwrap_or(SOIL_MOISTURE.default_value),
        }
    }
}

/// Unclamped product of the three tier factors
pub fn raw_multiplier(inputs: &ResolvedInputs) -> f64 {
    let mut multiplier = 1.0;
    multiplier *= TEMPERATURE.factor(inputs.temperature);
    multiplier *= HUMIDITY.factor(inputs.humidity);
    multiplier *= SOIL_MOISTURE.factor(inputs.soil_moisture);
    multiplier
}

/// Combined multiplier clamped to [0.5, 1.5]
pub fn yield_multiplier(inputs: &ResolvedInputs) -> f64 {
    raw_multiplier(inputs).clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEILING)
}

/// 0.5 plus the gain of every variable in its optimal band, capped at 1.0
pub fn confidence(inputs: &ResolvedInputs) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    for (band, value) in [
        (TEMPERATURE, inputs.temperature),
        (HUMIDITY, inputs.humidity),
        (SOIL_MOISTURE, inputs.soil_moisture),
    ] {
        if band.tier(value) == Tier::Optimal {
            confidence += band.confidence_gain;
        }
    }
    confidence.min(1.0)
}
