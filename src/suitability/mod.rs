//! Crop Suitability Engine
//!
//! Scores each rule of a crop table against a soil/temperature/humidity
//! condition vector and returns the plausible matches, ranked and explained.
//!
//! ## Architecture
//! - `scoring.rs` - per-factor partial credit (full / near-miss / miss)
//! - `reason.rs` - reason sentence from fully matched factors
//! - `engine.rs` - inclusion filter, stable ranking, `SuitabilityEngine`

pub mod scoring;
pub mod reason;
pub mod engine;

pub use scoring::{score_rule, match_band, FactorMatch, RuleScore};
pub use reason::generate_reason;
pub use engine::{evaluate, EvaluationResult, SuitabilityEngine, INCLUSION_THRESHOLD};
