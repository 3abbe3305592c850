//! Crop Suitability Table
//!
//! Soil affinity and temperature/humidity tolerance bands for the crops the
//! recommender knows about. Definition order is significant: it breaks score
//! ties in the ranked output.

use super::{RuleTable, ScoringRule, SuitabilityTier};
use crate::conditions::{Band, SoilType};
use crate::error::RuleTableError;

/// A single crop row with static labels
#[derive(Debug, Clone)]
struct CropDef {
    name: &'static str,
    soils: &'static [SoilType],
    temp: (f64, f64),
    humidity: (f64, f64),
    suitability: SuitabilityTier,
    yield_tier: &'static str,
}

// ============================================================================
// EMBEDDED CROP DATA
// ============================================================================

static CROPS: &[CropDef] = &[
    CropDef {
        name: "Wheat",
        soils: &[SoilType::Loamy],
        temp: (15.0, 25.0),
        humidity: (50.0, 70.0),
        suitability: SuitabilityTier::Excellent,
        yield_tier: "High",
    },
    CropDef {
        name: "Corn",
        soils: &[SoilType::Loamy, SoilType::Clay],
        temp: (20.0, 30.0),
        humidity: (60.0, 80.0),
        suitability: SuitabilityTier::Excellent,
        yield_tier: "High",
    },
    CropDef {
        name: "Tomatoes",
        soils: &[SoilType::Loamy],
        temp: (20.0, 28.0),
        humidity: (60.0, 75.0),
        suitability: SuitabilityTier::Excellent,
        yield_tier: "High",
    },
    CropDef {
        name: "Potatoes",
        soils: &[SoilType::Sandy, SoilType::Loamy],
        temp: (15.0, 22.0),
        humidity: (50.0, 70.0),
        suitability: SuitabilityTier::Good,
        yield_tier: "Medium-High",
    },
    CropDef {
        name: "Rice",
        soils: &[SoilType::Clay],
        temp: (20.0, 35.0),
        humidity: (70.0, 90.0),
        suitability: SuitabilityTier::Excellent,
        yield_tier: "High",
    },
    CropDef {
        name: "Barley",
        soils: &[SoilType::Loamy, SoilType::Sandy],
        temp: (10.0, 20.0),
        humidity: (40.0, 60.0),
        suitability: SuitabilityTier::Good,
        yield_tier: "Medium",
    },
];

/// Build the crop table with the standard 0.4/0.3/0.3 weights and
/// ±5°C / ±10pp near-miss windows.
pub fn default_crop_table() -> Result<RuleTable, RuleTableError> {
    RuleTable::builder()
        .rules(CROPS.iter().map(|def| {
            ScoringRule::new(
                def.name,
                def.soils.iter().cloned(),
                Band::new(def.temp.0, def.temp.1),
                Band::new(def.humidity.0, def.humidity.1),
                def.suitability,
                def.yield_tier,
            )
        }))
        .build()
}
