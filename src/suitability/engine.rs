//! Suitability Engine - ranks rule-table entries against a condition vector
//!
//! Pipeline per call:
//! 1. Score every rule (soil / temperature / humidity partial credit)
//! 2. Keep rules scoring strictly above `INCLUSION_THRESHOLD`
//! 3. Stable-sort by rounded score, descending (ties keep table order)
//! 4. Attach the generated reason

use super::reason::generate_reason;
use super::scoring::score_rule;
use crate::conditions::ConditionVector;
use crate::error::RuleTableError;
use crate::rules::{default_crop_table, RuleTable, SuitabilityTier};
use crate::utils::round2;
use serde::Serialize;
use std::cmp::Ordering;

/// Rules at or below this score are not returned
pub const INCLUSION_THRESHOLD: f64 = 0.5;

/// One ranked, annotated recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    #[serde(rename = "crop")]
    pub name: String,
    pub suitability: SuitabilityTier,
    pub reason: String,
    #[serde(rename = "yield")]
    pub yield_tier: String,
    /// Rounded to 2 decimals
    pub score: f64,
}

/// Evaluate all rules in `table` against `conditions`.
///
/// Never fails: no plausible match yields an empty vector.
pub fn evaluate(conditions: &ConditionVector, table: &RuleTable) -> Vec<EvaluationResult> {
    let weights = table.weights();
    let tolerance = table.tolerance();

    let mut results: Vec<EvaluationResult> = table
        .rules()
        .iter()
        .filter_map(|rule| {
            let score = score_rule(rule, conditions, weights, tolerance);
            if score.total <= INCLUSION_THRESHOLD {
                return None;
            }
            Some(EvaluationResult {
                name: rule.name.clone(),
                suitability: rule.suitability,
                reason: generate_reason(rule, conditions, &score),
                yield_tier: rule.yield_tier.clone(),
                score: round2(score.total),
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    tracing::debug!(
        "Evaluated {} rules for {} soil, {} included",
        table.len(),
        conditions.soil_type,
        results.len()
    );

    results
}

/// Crop recommender over an immutable rule table
#[derive(Debug, Clone)]
pub struct SuitabilityEngine {
    table: RuleTable,
}

impl SuitabilityEngine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Engine over the built-in crop table
    pub fn with_default_crops() -> Result<Self, RuleTableError> {
        Ok(Self::new(default_crop_table()?))
    }

    pub fn recommend(&self, conditions: &ConditionVector) -> Vec<EvaluationResult> {
        evaluate(conditions, &self.table)
    }

    /// All crop names in table order
    pub fn crop_names(&self) -> Vec<String> {
        self.table.names().map(str::to_string).collect()
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}
