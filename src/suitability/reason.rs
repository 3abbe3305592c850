//! Human-readable recommendation reasons
//!
//! Only full matches produce a clause. A near-miss still earns half credit in
//! the score but is not mentioned in the sentence.

use super::scoring::RuleScore;
use crate::conditions::ConditionVector;
use crate::rules::ScoringRule;
use smallvec::SmallVec;

/// Build the reason sentence for one scored rule
pub fn generate_reason(rule: &ScoringRule, conditions: &ConditionVector, score: &RuleScore) -> String {
    let mut clauses: SmallVec<[String; 3]> = SmallVec::new();

    if score.soil.is_full() {
        clauses.push(format!("optimal {} soil", conditions.soil_type));
    }
    if score.temperature.is_full() {
        clauses.push(format!("ideal temperature range ({}°C)", rule.temperature.label()));
    }
    if score.humidity.is_full() {
        clauses.push(format!("suitable humidity ({}%)", rule.humidity.label()));
    }

    if clauses.is_empty() {
        format!("{} may grow in these conditions with proper care.", rule.name)
    } else {
        format!("{} is recommended because of {}.", rule.name, clauses.join(", "))
    }
}
