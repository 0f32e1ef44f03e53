use serde::{Deserialize, Serialize};

/// ERC-20 metadata read from the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    /// Identifier of the token at the price oracle (e.g. a CoinGecko id).
    pub price_id: Option<String>,
}

impl TokenMetadata {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
            price_id: None,
        }
    }

    pub fn with_price_id(mut self, price_id: impl Into<String>) -> Self {
        self.price_id = Some(price_id.into());
        self
    }
}
