//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_analyzer_domain::prelude::*;
//! ```

pub use crate::entities::{PositionId, PositionRecord, TokenMetadata};
pub use crate::error::{Error, Result};
pub use crate::math::normalize;
pub use crate::metrics::{
    ImpermanentLoss, PoolValuation, compute_impermanent_loss, impermanent_loss_usd,
    price_change_ratio, valuate, valuate_pool,
};
pub use crate::report::{AnalysisReport, DisplayValue, MetricRow, assemble, assemble_position};
pub use crate::value_objects::{Amount, Percentage, Price, PriceQuotes};
