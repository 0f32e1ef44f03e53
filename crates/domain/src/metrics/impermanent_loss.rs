use crate::error::{Error, Result};
use rust_decimal::prelude::*;

/// Fractional digits kept in an impermanent loss percentage.
pub const IL_DECIMAL_PLACES: u32 = 16;

/// Calculates Impermanent Loss for a 50/50 constant product pool.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// Written as the value of the LP position over the value of holding, both
/// normalized to the initial deposit:
/// hodl = (1 + r) / 2, lp = sqrt(r).
///
/// # Arguments
///
/// * `price_change_ratio` - Price of one asset after the move divided by its
///   price before the move
///
/// # Returns
///
/// * `Decimal` - The impermanent loss in percent, negative for a loss
///   (e.g. -5.72 for a 2x move). The result is rounded to
///   `IL_DECIMAL_PLACES`, so `r` and `1/r` give identical values.
///
/// # Errors
///
/// * `Error::InvalidInput` if `price_change_ratio` is zero or negative.
pub fn compute_impermanent_loss(price_change_ratio: Decimal) -> Result<Decimal> {
    if price_change_ratio <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "price change ratio must be positive, got {price_change_ratio}"
        )));
    }
    if price_change_ratio == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let overflow = || {
        Error::invalid_input(format!(
            "price change ratio {price_change_ratio} is out of range"
        ))
    };

    let sqrt_ratio = price_change_ratio.sqrt().ok_or_else(overflow)?;
    let hodl_value = Decimal::ONE
        .checked_add(price_change_ratio)
        .ok_or_else(overflow)?
        / Decimal::TWO;
    let lp_value = sqrt_ratio;

    let il = lp_value
        .checked_div(hodl_value)
        .ok_or_else(overflow)?
        - Decimal::ONE;

    Ok((il * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(IL_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .normalize())
}

/// Price change ratio between an entry price and the current price.
///
/// # Errors
///
/// * `Error::InvalidInput` if either price is not strictly positive.
pub fn price_change_ratio(entry_price: Decimal, current_price: Decimal) -> Result<Decimal> {
    if entry_price <= Decimal::ZERO || current_price <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "prices must be positive, got entry {entry_price} and current {current_price}"
        )));
    }
    current_price
        .checked_div(entry_price)
        .ok_or_else(|| Error::invalid_input("price change ratio is out of range"))
}

/// USD amount of an impermanent loss percentage applied to a pool value.
pub fn impermanent_loss_usd(tvl: Decimal, il_pct: Decimal) -> Result<Decimal> {
    tvl.checked_mul(il_pct)
        .map(|v| v / Decimal::ONE_HUNDRED)
        .ok_or_else(|| Error::invalid_input("impermanent loss amount is out of range"))
}
