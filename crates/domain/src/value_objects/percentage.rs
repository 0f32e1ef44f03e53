use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A value expressed in percent (e.g. `0.3` means 0.3%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// Pool fee tier in hundredths of a basis point (3000 = 0.3%).
    pub fn from_fee_tier(fee_tier: u32) -> Self {
        Self(Decimal::from(fee_tier) / Decimal::from(10000))
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}
