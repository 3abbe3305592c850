//! Yield Predictor
//!
//! predictedYield = baseYield × fieldSize × clamp(multiplier, 0.5, 1.5)
//!
//! Unknown crops silently use the 2000 kg/ha fallback base yield.

use super::multipliers::{confidence, yield_multiplier, ResolvedInputs};
use super::narrative::{generate_recommendations, identify_factors};
use crate::conditions::SoilType;
use crate::rules::yield_table::base_yield_or_default;
use crate::utils::round2;
use serde::{Deserialize, Serialize};

/// Field conditions; every value is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldConditions {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub soil_moisture: Option<f64>,
    /// Echoed only; does not affect the estimate
    #[serde(default)]
    pub soil_type: Option<SoilType>,
}

impl YieldConditions {
    pub fn resolve(&self) -> ResolvedInputs {
        ResolvedInputs::resolve(self.temperature, self.humidity, self.soil_moisture)
    }
}

/// Quantitative estimate plus narration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    /// kg, rounded to 2 decimals
    pub predicted_yield: f64,
    /// [0, 1], rounded to 2 decimals
    pub confidence: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub crop_type: String,
    pub field_size: f64,
    pub season: String,
    pub base_yield_per_hectare: f64,
    /// Clamped combined multiplier
    #[serde(skip)]
    pub multiplier: f64,
}

/// Stateless yield engine
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldEngine;

impl YieldEngine {
    pub fn new() -> Self {
        Self
    }

    /// `field_size` is hectares and must be positive; the HTTP layer checks it.
    pub fn predict(
        &self,
        crop_type: &str,
        field_size: f64,
        conditions: &YieldConditions,
        season: &str,
    ) -> YieldEstimate {
        let base_yield = base_yield_or_default(crop_type);
        let inputs = conditions.resolve();

        let multiplier = yield_multiplier(&inputs);
        let predicted = base_yield * field_size * multiplier;

        tracing::debug!(
            "Yield for {} on {} ha: base {} × multiplier {:.3}",
            crop_type,
            field_size,
            base_yield,
            multiplier
        );

        YieldEstimate {
            predicted_yield: round2(predicted),
            confidence: round2(confidence(&inputs)),
            factors: identify_factors(&inputs),
            recommendations: generate_recommendations(&inputs),
            crop_type: crop_type.to_string(),
            field_size,
            season: season.to_string(),
            base_yield_per_hectare: base_yield,
            multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::yield_table::FALLBACK_BASE_YIELD;

    fn conditions(t: f64, h: f64, m: f64) -> YieldConditions {
        YieldConditions {
            temperature: Some(t),
            humidity: Some(h),
            soil_moisture: Some(m),
            soil_type: Some(SoilType::Loamy),
        }
    }

    #[test]
    fn test_optimal_wheat() {
        let estimate = YieldEngine::new().predict("Wheat", 2.0, &conditions(24.0, 65.0, 70.0), "Spring");
        assert_eq!(estimate.multiplier, 1.5);
        assert_eq!(estimate.predicted_yield, 9000.0);
        assert_eq!(estimate.confidence, 1.0);
        assert_eq!(estimate.base_yield_per_hectare, 3000.0);
        assert_eq!(estimate.season, "Spring");
    }

    #[test]
    fn test_unknown_crop_uses_fallback() {
        let estimate = YieldEngine::new().predict("Quinoa", 1.5, &YieldConditions::default(), "Winter");
        assert_eq!(estimate.base_yield_per_hectare, FALLBACK_BASE_YIELD);
        // Defaults are all optimal
        assert_eq!(estimate.predicted_yield, 4500.0);
        assert_eq!(estimate.crop_type, "Quinoa");
    }

    #[test]
    fn test_poor_conditions() {
        // 0.7 × 0.8 × 0.75 clamps up to 0.5
        let estimate = YieldEngine::new().predict("Corn", 1.0, &conditions(40.0, 20.0, 30.0), "Summer");
        assert_eq!(estimate.predicted_yield, 4000.0);
        assert_eq!(estimate.confidence, 0.5);
        assert_eq!(estimate.recommendations.len(), 3);
    }

    #[test]
    fn test_wire_shape() {
        let estimate = YieldEngine::new().predict("Rice", 1.0, &conditions(30.0, 78.0, 60.0), "Monsoon");
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["cropType"], "Rice");
        assert_eq!(json["baseYieldPerHectare"], 4000.0);
        assert_eq!(json["predictedYield"], 4000.0);
        assert_eq!(json["confidence"], 0.5);
        assert!(json.get("multiplier").is_none());
    }
}
