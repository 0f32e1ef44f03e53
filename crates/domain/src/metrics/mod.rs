use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod impermanent_loss;
pub mod valuation;

pub use impermanent_loss::{compute_impermanent_loss, impermanent_loss_usd, price_change_ratio};
pub use valuation::{PoolValuation, valuate, valuate_pool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpermanentLoss {
    /// Price change ratio the loss was computed for.
    pub price_change_ratio: Decimal,
    pub percentage_loss: Decimal,
    pub absolute_loss_usd: Decimal,
}

impl ImpermanentLoss {
    /// Impermanent loss of a pool worth `tvl` for a given price move.
    pub fn for_ratio(price_change_ratio: Decimal, tvl: Decimal) -> crate::error::Result<Self> {
        let percentage_loss = compute_impermanent_loss(price_change_ratio)?;
        let absolute_loss_usd = impermanent_loss_usd(tvl, percentage_loss)?;
        Ok(Self {
            price_change_ratio,
            percentage_loss,
            absolute_loss_usd,
        })
    }
}
