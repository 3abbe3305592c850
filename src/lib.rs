//! Crop Advisor
//!
//! Rule-based decision support for agriculture: crop suitability scoring,
//! yield estimation and fertilizer advice, served over a small REST API.
//!
//! ## Architecture
//! - `rules/`: static rule tables (crops, yield bands, fertilizer profiles)
//! - `suitability/`: weighted soil/temperature/humidity scoring and ranking
//! - `yield_model/`: clamped multiplier model, narration, mock history
//! - `advisory`: fertilizer lookup, schedules and soil notes
//! - `chatbot`, `marketplace`: request-handling collaborators
//! - `api_server`: Axum router (feature `api`)
//!
//! The three engines are pure functions over tables built once at startup.

pub mod advisory;
pub mod chatbot;
pub mod conditions;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod rules;
pub mod suitability;
pub mod utils;
pub mod yield_model;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use advisory::{Advisory, AdvisoryEngine, AdvisoryOutcome};
pub use conditions::{Band, ConditionVector, SoilType};
pub use config::ServerConfig;
pub use error::{CatalogError, RuleTableError};
pub use marketplace::{NewProduct, Product, ProductCatalog, ProductQuery};
pub use rules::{RuleTable, ScoringRule, SuitabilityTier, Weights};
pub use suitability::{evaluate, EvaluationResult, SuitabilityEngine};
pub use utils::round2;
pub use yield_model::{YieldConditions, YieldEngine, YieldEstimate};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppError, AppState};
