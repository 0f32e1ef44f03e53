use crate::error::Result;
use crate::math::normalize;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A token quantity in its smallest unit together with the token's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Human quantity, `raw / 10^decimals`, computed exactly.
    pub fn to_decimal(&self) -> Result<Decimal> {
        normalize(self.raw, i32::from(self.decimals))
    }
}
