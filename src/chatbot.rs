//! Keyword Chatbot
//!
//! A static keyword ladder over the lowercased message; the first matching
//! rung wins. Crop answers are phrased from the crop rule table so the text
//! quotes the same bands the suitability engine scores against.

use crate::rules::{RuleTable, ScoringRule};
use serde::{Deserialize, Serialize};

/// Fixed confidence reported with every reply
pub const REPLY_CONFIDENCE: f64 = 0.85;

pub const DEFAULT_CONTEXT: &str = "agriculture";

const ARID_ANSWER: &str = "Based on your query, crops that grow well in arid regions include wheat, \
barley, millet, and certain varieties of corn. These crops are drought-resistant and can thrive \
with minimal water.";

const GENERIC_ANSWER: &str = "Based on your query, this crop grows well in arid regions. For more \
specific information, please provide details about the crop type, soil conditions, or climate \
you're interested in.";

/// One rung of the ladder
enum Topic {
    Crop(&'static str),
    Arid,
}

static LADDER: &[(&[&str], Topic)] = &[
    (&["wheat", "grain"], Topic::Crop("Wheat")),
    (&["tomato", "tomatoes"], Topic::Crop("Tomatoes")),
    (&["corn", "maize"], Topic::Crop("Corn")),
    (&["arid", "desert", "dry"], Topic::Arid),
];

/// Incoming chat message. History is accepted for client compatibility only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<serde_json::Value>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub confidence: f64,
    pub context: String,
}

fn crop_answer(rule: &ScoringRule) -> String {
    let soils = rule
        .soil_types
        .iter()
        .map(|s| s.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join(" or ");

    format!(
        "Based on your query, the best conditions for {} are {} soil, temperatures of {}°C and humidity around {}%.",
        rule.name.to_lowercase(),
        soils,
        rule.temperature.label(),
        rule.humidity.label()
    )
}

/// Answer a message. `context` falls back to "agriculture".
pub fn respond(message: &str, context: Option<&str>, crops: &RuleTable) -> ChatReply {
    let lowered = message.to_lowercase();

    let topic = LADDER
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, topic)| topic);

    let response = match topic {
        Some(Topic::Crop(name)) => match crops.get(name) {
            Some(rule) => crop_answer(rule),
            None => GENERIC_ANSWER.to_string(),
        },
        Some(Topic::Arid) => ARID_ANSWER.to_string(),
        None => GENERIC_ANSWER.to_string(),
    };

    ChatReply {
        response,
        confidence: REPLY_CONFIDENCE,
        context: context.unwrap_or(DEFAULT_CONTEXT).to_string(),
    }
}
