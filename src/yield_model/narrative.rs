//! Qualitative yield narration
//!
//! Factor strings and recommendations use their own thresholds, separate
//! from the multiplier bands. A value can sit in a multiplier shoulder and
//! still produce no factor text (e.g. 33°C is "poor" for the multiplier but
//! not "extreme" here).

use super::multipliers::ResolvedInputs;

/// Factor text thresholds
const TEMP_EXTREME_LOW: f64 = 15.0;
const TEMP_EXTREME_HIGH: f64 = 35.0;
const HUMIDITY_LOW: f64 = 40.0;
const HUMIDITY_HIGH: f64 = 85.0;
const MOISTURE_LOW: f64 = 50.0;
const MOISTURE_HIGH: f64 = 85.0;

const OPTIMAL_FALLBACK: &str = "Current conditions are optimal - maintain current practices";

/// Qualitative factors, in temperature / humidity / soil moisture order
pub fn identify_factors(inputs: &ResolvedInputs) -> Vec<String> {
    let mut factors = Vec::new();

    let temp = inputs.temperature;
    if temp < TEMP_EXTREME_LOW || temp > TEMP_EXTREME_HIGH {
        factors.push("Extreme temperature conditions".to_string());
    } else if (20.0..=28.0).contains(&temp) {
        factors.push("Optimal temperature range".to_string());
    }

    let humidity = inputs.humidity;
    if humidity < HUMIDITY_LOW || humidity > HUMIDITY_HIGH {
        factors.push("Suboptimal humidity levels".to_string());
    } else if (60.0..=75.0).contains(&humidity) {
        factors.push("Ideal humidity for crop growth".to_string());
    }

    let moisture = inputs.soil_moisture;
    if moisture < MOISTURE_LOW {
        factors.push("Low soil moisture - irrigation needed".to_string());
    } else if (65.0..=80.0).contains(&moisture) {
        factors.push("Optimal soil moisture".to_string());
    } else if moisture > MOISTURE_HIGH {
        factors.push("Excessive soil moisture - drainage needed".to_string());
    }

    factors
}

/// Actionable recommendations, in temperature / soil moisture / humidity order.
///
/// Falls back to a single "conditions are optimal" line when nothing triggers.
pub fn generate_recommendations(inputs: &ResolvedInputs) -> Vec<String> {
    let mut recommendations = Vec::new();

    if inputs.temperature < TEMP_EXTREME_LOW {
        recommendations.push("Consider using greenhouse or cold frames to maintain temperature".to_string());
    } else if inputs.temperature > TEMP_EXTREME_HIGH {
        recommendations.push("Implement shade structures and increase irrigation frequency".to_string());
    }

    if inputs.soil_moisture < MOISTURE_LOW {
        recommendations.push("Increase irrigation to maintain soil moisture between 65-80%".to_string());
    } else if inputs.soil_moisture > MOISTURE_HIGH {
        recommendations.push("Improve drainage to prevent waterlogging".to_string());
    }

    if inputs.humidity < HUMIDITY_LOW {
        recommendations.push("Consider misting systems to increase humidity".to_string());
    } else if inputs.humidity > HUMIDITY_HIGH {
        recommendations.push("Ensure proper ventilation to reduce humidity".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(OPTIMAL_FALLBACK.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(t: f64, h: f64, m: f64) -> ResolvedInputs {
        ResolvedInputs { temperature: t, humidity: h, soil_moisture: m }
    }

    #[test]
    fn test_all_optimal_factors() {
        let factors = identify_factors(&inputs(24.0, 65.0, 70.0));
        assert_eq!(
            factors,
            vec!["Optimal temperature range", "Ideal humidity for crop growth", "Optimal soil moisture"]
        );
        assert_eq!(generate_recommendations(&inputs(24.0, 65.0, 70.0)), vec![OPTIMAL_FALLBACK]);
    }

    #[test]
    fn test_gap_values_emit_no_factor() {
        // 33°C: poor multiplier tier, but neither extreme nor optimal text
        let factors = identify_factors(&inputs(33.0, 50.0, 60.0));
        assert!(factors.is_empty());
    }

    #[test]
    fn test_extremes() {
        let i = inputs(38.0, 90.0, 30.0);
        assert_eq!(
            identify_factors(&i),
            vec![
                "Extreme temperature conditions",
                "Suboptimal humidity levels",
                "Low soil moisture - irrigation needed",
            ]
        );
        assert_eq!(
            generate_recommendations(&i),
            vec![
                "Implement shade structures and increase irrigation frequency",
                "Increase irrigation to maintain soil moisture between 65-80%",
                "Ensure proper ventilation to reduce humidity",
            ]
        );
    }

    #[test]
    fn test_cold_dry_waterlogged() {
        let i = inputs(10.0, 30.0, 90.0);
        assert_eq!(
            generate_recommendations(&i),
            vec![
                "Consider using greenhouse or cold frames to maintain temperature",
                "Improve drainage to prevent waterlogging",
                "Consider misting systems to increase humidity",
            ]
        );
        assert!(identify_factors(&i).contains(&"Excessive soil moisture - drainage needed".to_string()));
    }
}
