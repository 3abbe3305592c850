//! Yield Estimation
//!
//! Composes continuous tier multipliers (temperature, humidity, soil
//! moisture) into a clamped yield factor, a heuristic confidence, and
//! qualitative factors/recommendations.
//!
//! ## Architecture
//! - `multipliers.rs` - tiering, clamped multiplier, confidence
//! - `narrative.rs` - factor strings and recommendations (own thresholds)
//! - `predictor.rs` - `YieldEngine::predict` and the wire record
//! - `history.rs` - seeded mock history for the dashboard chart

pub mod multipliers;
pub mod narrative;
pub mod predictor;
pub mod history;

pub use multipliers::{confidence, yield_multiplier, ResolvedInputs, Tier};
pub use predictor::{YieldConditions, YieldEngine, YieldEstimate};
pub use history::{generate_history, HistoryEntry, DEFAULT_HISTORY_MONTHS};
