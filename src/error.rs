//! Library error types

use thiserror::Error;

/// Raised while building a rule table. Tables are validated once at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleTableError {
    #[error("rule name must not be empty")]
    EmptyName,

    #[error("duplicate rule name: {0}")]
    DuplicateName(String),

    #[error("rule {rule}: {axis} band is inverted ({min} > {max})")]
    InvertedBand {
        rule: String,
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("weights must sum to 1.0 at full match, got {0}")]
    WeightSum(f64),

    #[error("negative weight or tolerance: {0}")]
    Negative(&'static str),

    #[error("non-finite weight or tolerance: {0}")]
    NonFinite(&'static str),
}

/// Marketplace store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Product {0} not found")]
    NotFound(u64),

    #[error("Invalid product: {0}")]
    Validation(String),

    #[error("Catalog lock poisoned")]
    Poisoned,
}
