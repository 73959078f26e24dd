//! Error types for the plan catalog

use thiserror::Error;

/// Result type for plan catalog operations
pub type Result<T> = std::result::Result<T, PlansError>;

/// Structural defects in a pricing configuration, reported when a catalog is built.
#[derive(Debug, Error, PartialEq)]
pub enum PlansError {
    /// The configuration declares no plans, so there is no fallback plan
    #[error("pricing configuration declares no plans")]
    NoPlans,

    /// Two plans share an id
    #[error("duplicate plan id: {id}")]
    DuplicatePlanId { id: String },

    /// A billing price id is claimed more than once
    #[error("billing price id '{price_id}' is used by both '{first}' and '{second}'")]
    DuplicatePriceId {
        price_id: String,
        first: String,
        second: String,
    },

    /// A plan price is negative or not a finite number
    #[error("plan '{plan}' has invalid {period} price {amount}")]
    InvalidPrice {
        plan: String,
        period: &'static str,
        amount: f64,
    },

    /// A limit is below the unlimited sentinel
    #[error("{scope}: limit '{key}' has invalid value {value} (expected -1 or a non-negative ceiling)")]
    InvalidLimit {
        scope: String,
        key: String,
        value: i64,
    },
}
