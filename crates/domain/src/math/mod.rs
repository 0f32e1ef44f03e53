//! Exact decimal helpers for on-chain integer amounts.

pub mod normalize;

pub use normalize::normalize;
