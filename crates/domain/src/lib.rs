//! Value computation core of the LP analyzer.
//!
//! This crate holds the pure, I/O-free part of the analyzer:
//! - Balance normalization from raw on-chain integers
//! - Pool valuation (TVL) from oracle quotes
//! - Impermanent loss for constant product pools
//! - Assembly of display-ready reports

/// Prelude module for convenient imports.
pub mod prelude;

/// Token and position entities.
pub mod entities;
/// Error type.
pub mod error;
/// Exact decimal scaling.
pub mod math;
/// Valuation and risk metrics.
pub mod metrics;
/// Display-ready reports.
pub mod report;
/// Amounts, prices and percentages.
pub mod value_objects;

pub use error::{Error, Result};
