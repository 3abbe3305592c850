//! Yield Model Constants
//!
//! Base yield per hectare for known crops and the three-tier multiplier bands
//! for temperature, humidity and soil moisture.

use crate::conditions::Band;

/// Base yield (kg/ha) used when a crop is not in the table
pub const FALLBACK_BASE_YIELD: f64 = 2000.0;

/// Combined multiplier is clamped into this range
pub const MULTIPLIER_FLOOR: f64 = 0.5;
pub const MULTIPLIER_CEILING: f64 = 1.5;

/// Confidence starts here and gains per optimal variable
pub const BASE_CONFIDENCE: f64 = 0.5;

static BASE_YIELDS: &[(&str, f64)] = &[
    ("Wheat", 3000.0),
    ("Corn", 8000.0),
    ("Tomatoes", 50000.0),
    ("Potatoes", 25000.0),
    ("Rice", 4000.0),
    ("Barley", 2500.0),
];

/// Look up base yield; `None` for crops not in the table
pub fn base_yield(crop: &str) -> Option<f64> {
    BASE_YIELDS
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, y)| *y)
}

/// Base yield with the silent 2000 kg/ha fallback
pub fn base_yield_or_default(crop: &str) -> f64 {
    base_yield(crop).unwrap_or(FALLBACK_BASE_YIELD)
}

/// Three discrete tiers for one environmental variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplierBand {
    /// Optimal range (inclusive)
    pub optimal: Band,
    /// Outer acceptable range; everything inside it but outside `optimal` is a shoulder
    pub acceptable: Band,
    pub optimal_factor: f64,
    pub shoulder_factor: f64,
    pub poor_factor: f64,
    /// Value assumed when the input omits this variable
    pub default_value: f64,
    /// Confidence gained when the value is optimal
    pub confidence_gain: f64,
}

pub const TEMPERATURE: MultiplierBand = MultiplierBand {
    optimal: Band::new(20.0, 28.0),
    acceptable: Band::new(15.0, 32.0),
    optimal_factor: 1.2,
    shoulder_factor: 1.0,
    poor_factor: 0.7,
    default_value: 25.0,
    confidence_gain: 0.15,
};

pub const HUMIDITY: MultiplierBand = MultiplierBand {
    optimal: Band::new(60.0, 75.0),
    acceptable: Band::new(50.0, 80.0),
    optimal_factor: 1.1,
    shoulder_factor: 1.0,
    poor_factor: 0.8,
    default_value: 65.0,
    confidence_gain: 0.15,
};

pub const SOIL_MOISTURE: MultiplierBand = MultiplierBand {
    optimal: Band::new(65.0, 80.0),
    acceptable: Band::new(55.0, 85.0),
    optimal_factor: 1.15,
    shoulder_factor: 1.0,
    poor_factor: 0.75,
    default_value: 70.0,
    confidence_gain: 0.2,
};
