//! Condition vectors and tolerance bands
//!
//! Defines the inputs scored by the suitability engine (soil category,
//! temperature, humidity) plus the inclusive `Band` used by every rule table
//! to describe a tolerance range. Soil moisture and pH are carried by the
//! engines that read them (`YieldConditions`, the advisory `soil_ph`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Soil category as reported by the client.
///
/// Parsing is exact and case-sensitive: `"loamy"` is not `Loamy`. Unknown
/// labels are kept verbatim in `Other` so they round-trip but never match a
/// rule's soil set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Silty,
    Other(String),
}

impl SoilType {
    pub fn as_str(&self) -> &str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Silty => "Silty",
            SoilType::Other(label) => label.as_str(),
        }
    }

    /// Parse a client label. Never fails.
    pub fn parse(label: &str) -> Self {
        match label {
            "Loamy" => SoilType::Loamy,
            "Clay" => SoilType::Clay,
            "Sandy" => SoilType::Sandy,
            "Silty" => SoilType::Silty,
            other => SoilType::Other(other.to_string()),
        }
    }
}

impl FromStr for SoilType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SoilType::parse(s))
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SoilType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SoilType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(SoilType::parse(&label))
    }
}

/// Inclusive numeric range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Boundaries count as inside.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Distance from the band midpoint, used for near-miss credit
    pub fn distance_from_midpoint(&self, value: f64) -> f64 {
        (value - self.midpoint()).abs()
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Display form used in reasons, e.g. `15-25`
    pub fn label(&self) -> String {
        format!("{}-{}", format_bound(self.min), format_bound(self.max))
    }
}

/// Whole numbers print without a fractional part (`15`, not `15.0`).
fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Environmental inputs for one evaluation.
///
/// Constructed fresh per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionVector {
    pub soil_type: SoilType,

    /// Air temperature (°C)
    pub temperature: f64,

    /// Relative humidity (%, 0-100)
    pub humidity: f64,
}

impl ConditionVector {
    pub fn new(soil_type: SoilType, temperature: f64, humidity: f64) -> Self {
        Self {
            soil_type,
            temperature,
            humidity,
        }
    }
}
