//! Fertilizer Advisory
//!
//! Table lookup of N-P-K demand and recommended products for a crop, plus a
//! growth-stage schedule and notes derived from soil type and pH.
//!
//! An unknown crop is `AdvisoryOutcome::NotFound`, which is distinct from an
//! advisory that exists but carries no notes.

use crate::conditions::SoilType;
use crate::rules::fertilizer_table::{self, NutrientRequirements, StageDef};
use serde::Serialize;

/// pH below this is acidic
pub const ACIDIC_PH: f64 = 6.0;
/// pH above this is alkaline
pub const ALKALINE_PH: f64 = 7.5;

/// One step of an application schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStep {
    pub stage: String,
    pub fertilizer: String,
    pub amount: String,
}

impl From<&StageDef> for ScheduleStep {
    fn from(def: &StageDef) -> Self {
        Self {
            stage: def.stage.to_string(),
            fertilizer: def.fertilizer.to_string(),
            amount: def.amount.to_string(),
        }
    }
}

/// Complete advisory for a known crop
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    pub crop: String,
    pub soil_type: SoilType,
    pub requirements: NutrientRequirements,
    pub recommended_fertilizers: Vec<String>,
    pub application_schedule: Vec<ScheduleStep>,
    pub notes: Vec<String>,
}

/// Lookup result: found, or no data for this crop
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisoryOutcome {
    Found(Advisory),
    NotFound { crop: String },
}

impl AdvisoryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, AdvisoryOutcome::Found(_))
    }

    pub fn into_advisory(self) -> Option<Advisory> {
        match self {
            AdvisoryOutcome::Found(advisory) => Some(advisory),
            AdvisoryOutcome::NotFound { .. } => None,
        }
    }
}

/// Soil retention and pH notes
pub fn soil_notes(soil_type: &SoilType, soil_ph: Option<f64>) -> Vec<String> {
    let mut notes = Vec::new();

    match soil_type {
        SoilType::Clay => notes.push(
            "Clay soil retains nutrients well - reduce application rates by 10-15%".to_string(),
        ),
        SoilType::Sandy => notes.push(
            "Sandy soil requires more frequent applications due to low retention".to_string(),
        ),
        _ => {}
    }

    if let Some(ph) = soil_ph {
        if ph < ACIDIC_PH {
            notes.push("Acidic soil detected - consider lime application".to_string());
        } else if ph > ALKALINE_PH {
            notes.push("Alkaline soil - use acid-forming fertilizers".to_string());
        }
    }

    notes
}

/// Stateless fertilizer advisor
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryEngine;

impl AdvisoryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, crop_type: &str, soil_type: &SoilType, soil_ph: Option<f64>) -> AdvisoryOutcome {
        let Some(profile) = fertilizer_table::profile(crop_type) else {
            tracing::debug!("No fertilizer profile for {}", crop_type);
            return AdvisoryOutcome::NotFound {
                crop: crop_type.to_string(),
            };
        };

        AdvisoryOutcome::Found(Advisory {
            crop: crop_type.to_string(),
            soil_type: soil_type.clone(),
            requirements: profile.requirements,
            recommended_fertilizers: profile.recommended.iter().map(|s| s.to_string()).collect(),
            application_schedule: fertilizer_table::schedule(crop_type)
                .iter()
                .map(ScheduleStep::from)
                .collect(),
            notes: soil_notes(soil_type, soil_ph),
        })
    }
}
