//! The daily withdrawal limit
//!
//! Exactly one limit exists in the system: the ceiling on the sum of a
//! single card's withdrawals within one calendar day.

use rust_decimal::Decimal;
use serde::Serialize;

/// Key of the singleton daily limit
pub const DAILY_LIMIT_NAME: &str = "daily_limit";

/// Default daily limit applied when the store is initialized: 1,000,000.00
pub fn default_daily_limit() -> Decimal {
    Decimal::new(100_000_000, 2)
}

/// Projection of the daily limit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Limit {
    /// The limit key
    pub name: String,

    /// Ceiling on one card's daily withdrawal total
    pub value: Decimal,
}
