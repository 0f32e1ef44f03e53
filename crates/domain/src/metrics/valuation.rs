use crate::error::{Error, Result};
use crate::value_objects::price::{Price, PriceQuotes};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Two-token pool holdings priced in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolValuation {
    pub balance_a: Decimal,
    pub balance_b: Decimal,
    pub price_a: Price,
    pub price_b: Price,
    pub tvl: Decimal,
}

/// Total value locked of a two-token pool.
/// formula: balance_a * price_a + balance_b * price_b
///
/// # Errors
///
/// * `Error::InvalidInput` if any input is negative or the result overflows.
pub fn valuate(
    balance_a: Decimal,
    price_a: Decimal,
    balance_b: Decimal,
    price_b: Decimal,
) -> Result<Decimal> {
    for (name, value) in [
        ("balance A", balance_a),
        ("price A", price_a),
        ("balance B", balance_b),
        ("price B", price_b),
    ] {
        if value < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
    }

    let overflow = || Error::invalid_input("pool value is out of range");
    let value_a = balance_a.checked_mul(price_a).ok_or_else(overflow)?;
    let value_b = balance_b.checked_mul(price_b).ok_or_else(overflow)?;
    value_a.checked_add(value_b).ok_or_else(overflow)
}

/// Prices both balances from an oracle result and computes the TVL.
///
/// Both identifiers must be quoted, whatever the balance on that side: a
/// missing quote never counts as zero.
///
/// # Errors
///
/// * `Error::MissingPrice` if `price_id_a` or `price_id_b` is not in `quotes`.
/// * `Error::InvalidInput` as for [`valuate`].
pub fn valuate_pool(
    balance_a: Decimal,
    price_id_a: &str,
    balance_b: Decimal,
    price_id_b: &str,
    quotes: &PriceQuotes,
) -> Result<PoolValuation> {
    let price_a = quotes.get(price_id_a)?;
    let price_b = quotes.get(price_id_b)?;
    let tvl = valuate(balance_a, price_a.value, balance_b, price_b.value)?;

    Ok(PoolValuation {
        balance_a,
        balance_b,
        price_a,
        price_b,
        tvl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valuate_exact() {
        let tvl = valuate(dec!(2.0), dec!(3000), dec!(6000), dec!(1)).unwrap();
        assert_eq!(tvl, dec!(12000));
    }

    #[test]
    fn test_valuate_sub_cent_prices() {
        // 1e9 tokens at $0.000001234 each plus 0.5 tokens at $0.01
        let tvl = valuate(
            dec!(1000000000),
            dec!(0.000001234),
            dec!(0.5),
            dec!(0.01),
        )
        .unwrap();
        assert_eq!(tvl, dec!(1234.005));
    }

    #[test]
    fn test_valuate_rejects_negative_inputs() {
        assert!(matches!(
            valuate(dec!(-1), dec!(1), dec!(1), dec!(1)),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            valuate(dec!(1), dec!(1), dec!(1), dec!(-0.01)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_valuate_pool() {
        let mut quotes = PriceQuotes::new();
        quotes.insert("ethereum", dec!(3000)).unwrap();
        quotes.insert("usd-coin", dec!(1)).unwrap();

        let valuation =
            valuate_pool(dec!(5), "ethereum", dec!(10000), "usd-coin", &quotes).unwrap();
        assert_eq!(valuation.tvl, dec!(25000));
        assert_eq!(valuation.price_a.value, dec!(3000));
        assert_eq!(valuation.price_b.value, dec!(1));
    }

    #[test]
    fn test_valuate_pool_missing_price_with_zero_balance() {
        let mut quotes = PriceQuotes::new();
        quotes.insert("ethereum", dec!(3000)).unwrap();

        let err = valuate_pool(dec!(5), "ethereum", Decimal::ZERO, "usd-coin", &quotes)
            .unwrap_err();
        assert_eq!(err, Error::MissingPrice("usd-coin".to_string()));

        let err = valuate_pool(Decimal::ZERO, "wrapped-bitcoin", dec!(5), "ethereum", &quotes)
            .unwrap_err();
        assert_eq!(err, Error::MissingPrice("wrapped-bitcoin".to_string()));
    }
}
