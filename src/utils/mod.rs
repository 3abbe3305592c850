//! Utility modules shared across the engines
//!
//! - Rounding: 2-decimal output rounding used on the wire

pub mod rounding;

pub use rounding::round2;
