//! Fertilizer Requirement Table
//!
//! Nutrient intensity per crop, recommended products, and growth-stage
//! application schedules.

use serde::{Deserialize, Serialize};

/// Categorical nutrient demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

/// N-P-K demand for a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientRequirements {
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
}

/// Static requirement row
#[derive(Debug, Clone)]
pub struct FertilizerProfile {
    pub crop: &'static str,
    pub requirements: NutrientRequirements,
    pub recommended: &'static [&'static str],
}

/// One application in a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDef {
    pub stage: &'static str,
    pub fertilizer: &'static str,
    pub amount: &'static str,
}

use NutrientLevel::{High, Medium, VeryHigh};

static PROFILES: &[FertilizerProfile] = &[
    FertilizerProfile {
        crop: "Wheat",
        requirements: NutrientRequirements { nitrogen: High, phosphorus: Medium, potassium: Medium },
        recommended: &["Urea", "DAP", "Potash"],
    },
    FertilizerProfile {
        crop: "Corn",
        requirements: NutrientRequirements { nitrogen: VeryHigh, phosphorus: High, potassium: Medium },
        recommended: &["Urea", "Superphosphate", "Potash"],
    },
    FertilizerProfile {
        crop: "Tomatoes",
        requirements: NutrientRequirements { nitrogen: Medium, phosphorus: High, potassium: VeryHigh },
        recommended: &["NPK 10-20-20", "Potash", "Compost"],
    },
    FertilizerProfile {
        crop: "Potatoes",
        requirements: NutrientRequirements { nitrogen: Medium, phosphorus: High, potassium: High },
        recommended: &["NPK 15-15-15", "Potash", "Organic Manure"],
    },
];

static SCHEDULES: &[(&str, &[StageDef])] = &[
    (
        "Wheat",
        &[
            StageDef { stage: "Pre-planting", fertilizer: "DAP", amount: "100-120 kg/ha" },
            StageDef { stage: "Tillering", fertilizer: "Urea", amount: "50-60 kg/ha" },
            StageDef { stage: "Flowering", fertilizer: "Urea", amount: "30-40 kg/ha" },
        ],
    ),
    (
        "Corn",
        &[
            StageDef { stage: "Pre-planting", fertilizer: "DAP", amount: "150-180 kg/ha" },
            StageDef { stage: "V6 stage", fertilizer: "Urea", amount: "100-120 kg/ha" },
            StageDef { stage: "Tasseling", fertilizer: "Urea", amount: "50-60 kg/ha" },
        ],
    ),
    (
        "Tomatoes",
        &[
            StageDef { stage: "Transplanting", fertilizer: "NPK 10-20-20", amount: "200-250 kg/ha" },
            StageDef { stage: "Flowering", fertilizer: "Potash", amount: "100-150 kg/ha" },
            StageDef { stage: "Fruiting", fertilizer: "Potash", amount: "50-75 kg/ha" },
        ],
    ),
];

/// Used for crops with requirement data but no dedicated schedule
pub static GENERAL_SCHEDULE: &[StageDef] = &[StageDef {
    stage: "General",
    fertilizer: "Balanced NPK",
    amount: "As per soil test",
}];

/// Exact, case-sensitive lookup
pub fn profile(crop: &str) -> Option<&'static FertilizerProfile> {
    PROFILES.iter().find(|p| p.crop == crop)
}

/// Dedicated schedule or the general fallback
pub fn schedule(crop: &str) -> &'static [StageDef] {
    SCHEDULES
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, stages)| *stages)
        .unwrap_or(GENERAL_SCHEDULE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup() {
        let corn = profile("Corn").unwrap();
        assert_eq!(corn.requirements.nitrogen, NutrientLevel::VeryHigh);
        assert!(profile("Rice").is_none());
    }

    #[test]
    fn test_potatoes_fall_back_to_general_schedule() {
        assert_eq!(schedule("Potatoes"), GENERAL_SCHEDULE);
        assert_eq!(schedule("Corn")[1].stage, "V6 stage");
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&NutrientLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very high\"");
    }
}
