//! CoinGecko `simple/price` client.

use super::PriceOracle;
use async_trait::async_trait;
use lp_analyzer_domain::value_objects::PriceQuotes;
use lp_analyzer_domain::{Error, Result};
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Quote currency requested from the API.
const VS_CURRENCY: &str = "usd";

/// USD price oracle backed by the CoinGecko public API.
#[derive(Debug, Clone)]
pub struct CoinGeckoOracle {
    client: Client,
    base_url: String,
}

impl CoinGeckoOracle {
    /// Creates a client for `base_url` (e.g. `https://api.coingecko.com/api/v3`).
    ///
    /// # Errors
    /// Returns `Error::Upstream` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::upstream(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn prices(&self, ids: &[String]) -> Result<PriceQuotes> {
        if ids.is_empty() {
            return Ok(PriceQuotes::new());
        }

        let url = format!("{}/simple/price", self.base_url);
        debug!(ids = ?ids, "Fetching USD prices");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.join(",")), ("vs_currencies", VS_CURRENCY.to_string())])
            .send()
            .await
            .map_err(|e| Error::upstream(format!("price request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!(
                "price API returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("invalid price response: {e}")))?;

        let quotes = parse_simple_price(&body)?;
        if quotes.len() < ids.len() {
            warn!(requested = ids.len(), quoted = quotes.len(), "Some ids were not priced");
        }
        Ok(quotes)
    }
}

/// Decodes a `simple/price` body: `{"<id>": {"usd": <number>}, ...}`.
///
/// Ids without a `usd` entry are left out of the result.
fn parse_simple_price(body: &serde_json::Value) -> Result<PriceQuotes> {
    let entries = body
        .as_object()
        .ok_or_else(|| Error::upstream("price response is not a JSON object"))?;

    let mut quotes = PriceQuotes::new();
    for (id, entry) in entries {
        let Some(value) = entry.get(VS_CURRENCY) else {
            continue;
        };
        let number = value
            .as_number()
            .ok_or_else(|| Error::upstream(format!("price for '{id}' is not a number")))?;
        let price = parse_number(number)
            .ok_or_else(|| Error::upstream(format!("price for '{id}' is out of range: {number}")))?;
        quotes
            .insert(id.clone(), price)
            .map_err(|e| Error::upstream(e.to_string()))?;
    }
    Ok(quotes)
}

/// JSON numbers are parsed from their text, never through `f64` arithmetic.
fn parse_number(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_simple_price() {
        let body = json!({
            "ethereum": { "usd": 3000.12 },
            "usd-coin": { "usd": 1 }
        });
        let quotes = parse_simple_price(&body).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes.get("ethereum").unwrap().value, dec!(3000.12));
        assert_eq!(quotes.get("usd-coin").unwrap().value, dec!(1));
    }

    #[test]
    fn test_parse_tiny_price_in_scientific_notation() {
        let body = json!({ "pepe": { "usd": 1.2e-7 } });
        let quotes = parse_simple_price(&body).unwrap();
        assert_eq!(quotes.get("pepe").unwrap().value, dec!(0.00000012));
    }

    #[test]
    fn test_unpriced_ids_are_omitted() {
        let body = json!({ "ethereum": { "usd": 3000 }, "unknown": {} });
        let quotes = parse_simple_price(&body).unwrap();
        assert!(quotes.contains("ethereum"));
        assert!(!quotes.contains("unknown"));
        assert!(matches!(quotes.get("unknown"), Err(Error::MissingPrice(_))));
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(
            parse_simple_price(&json!(["ethereum"])),
            Err(Error::Upstream(_))
        ));
        assert!(matches!(
            parse_simple_price(&json!({ "ethereum": { "usd": "3000" } })),
            Err(Error::Upstream(_))
        ));
        assert!(matches!(
            parse_simple_price(&json!({ "ethereum": { "usd": -1 } })),
            Err(Error::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_no_ids_skips_request() {
        let oracle = CoinGeckoOracle::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let quotes = oracle.prices(&[]).await.unwrap();
        assert!(quotes.is_empty());
    }
}
