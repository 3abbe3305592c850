//! Mock yield history
//!
//! One entry per month stepping back 30 days at a time, each a ±10% jitter
//! around the crop's base yield. The RNG is injected so callers can seed it.

use crate::rules::yield_table::base_yield_or_default;
use crate::utils::round2;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_HISTORY_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// `YYYY-MM`
    pub month: String,
    #[serde(rename = "yield")]
    pub yield_kg: f64,
    pub crop_type: String,
}

/// Generate `months` entries, newest first
pub fn generate_history<R: Rng + ?Sized>(
    crop_type: Option<&str>,
    months: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<HistoryEntry> {
    let base = base_yield_or_default(crop_type.unwrap_or_default());
    let label = crop_type.unwrap_or("Mixed").to_string();

    (0..months)
        .map(|i| {
            let date = now - Duration::days(30 * i as i64);
            let jitter: f64 = rng.gen_range(0.9..1.1);
            HistoryEntry {
                month: date.format("%Y-%m").to_string(),
                yield_kg: round2(base * jitter),
                crop_type: label.clone(),
            }
        })
        .collect()
}
