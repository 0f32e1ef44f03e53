use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// USD unit price of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }
}

/// Oracle result: asset identifier to USD price.
///
/// Identifiers the oracle could not price are absent; a lookup on them is an
/// error rather than a zero price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuotes {
    quotes: HashMap<String, Price>,
}

impl PriceQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a quote.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for a negative price.
    pub fn insert(&mut self, id: impl Into<String>, usd: Decimal) -> Result<()> {
        let id = id.into();
        if usd < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "price for '{id}' must be non-negative, got {usd}"
            )));
        }
        self.quotes.insert(id, Price::new(usd));
        Ok(())
    }

    /// Looks up the price of `id`.
    ///
    /// # Errors
    /// Returns `Error::MissingPrice` if the oracle did not quote `id`.
    pub fn get(&self, id: &str) -> Result<Price> {
        self.quotes
            .get(id)
            .copied()
            .ok_or_else(|| Error::MissingPrice(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.quotes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Price)> {
        self.quotes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Price)> for PriceQuotes {
    fn from_iter<I: IntoIterator<Item = (String, Price)>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_quote_is_an_error() {
        let mut quotes = PriceQuotes::new();
        quotes.insert("ethereum", dec!(3000)).unwrap();

        assert_eq!(quotes.get("ethereum").unwrap().value, dec!(3000));
        assert_eq!(
            quotes.get("usd-coin").unwrap_err(),
            Error::MissingPrice("usd-coin".to_string())
        );
    }

    #[test]
    fn test_negative_quote_rejected() {
        let mut quotes = PriceQuotes::new();
        let err = quotes.insert("ethereum", dec!(-1)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_zero_quote_is_kept() {
        let mut quotes = PriceQuotes::new();
        quotes.insert("dead-token", Decimal::ZERO).unwrap();
        assert_eq!(quotes.get("dead-token").unwrap().value, Decimal::ZERO);
    }
}
