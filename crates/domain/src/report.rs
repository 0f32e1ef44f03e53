//! Display-ready records for the two analysis flows.
//!
//! This is the only place where exact decimals become `f64`.

use crate::entities::{PositionRecord, TokenMetadata};
use crate::metrics::{ImpermanentLoss, PoolValuation};
use crate::value_objects::Percentage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rendered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl DisplayValue {
    fn decimal(value: Decimal) -> Self {
        // `to_f64` only fails on values f64 cannot hold; keep the exact text then.
        value
            .to_f64()
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
        }
    }
}

/// One metric name and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub metric: String,
    pub value: DisplayValue,
}

/// Ordered metric table produced by one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<MetricRow>,
}

impl AnalysisReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, metric: impl Into<String>, value: DisplayValue) {
        self.rows.push(MetricRow {
            metric: metric.into(),
            value,
        });
    }

    /// Value of the first row named `metric`.
    pub fn get(&self, metric: &str) -> Option<&DisplayValue> {
        self.rows
            .iter()
            .find(|row| row.metric == metric)
            .map(|row| &row.value)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.metric.as_str())
    }
}

/// Builds the pool valuation table.
pub fn assemble(
    token_a: &TokenMetadata,
    token_b: &TokenMetadata,
    valuation: &PoolValuation,
    impermanent_loss: &ImpermanentLoss,
) -> AnalysisReport {
    let mut report = AnalysisReport::new(format!(
        "{}/{} pool analysis",
        token_a.symbol, token_b.symbol
    ));

    report.push("Token A", DisplayValue::Text(token_a.symbol.clone()));
    report.push("Token B", DisplayValue::Text(token_b.symbol.clone()));
    report.push("Balance A", DisplayValue::decimal(valuation.balance_a));
    report.push("Balance B", DisplayValue::decimal(valuation.balance_b));
    report.push("Price A (USD)", DisplayValue::decimal(valuation.price_a.value));
    report.push("Price B (USD)", DisplayValue::decimal(valuation.price_b.value));
    report.push("TVL (USD)", DisplayValue::decimal(valuation.tvl));
    report.push(
        "Simulated IL (%)",
        DisplayValue::decimal(impermanent_loss.percentage_loss),
    );
    report.push(
        "Price change ratio",
        DisplayValue::decimal(impermanent_loss.price_change_ratio),
    );
    report.push(
        "IL on TVL (USD)",
        DisplayValue::decimal(impermanent_loss.absolute_loss_usd),
    );

    report
}

fn text(s: &str) -> DisplayValue {
    DisplayValue::Text(s.to_string())
}

/// Builds the position inspection table. Only the fee tier is converted.
pub fn assemble_position(position: &PositionRecord) -> AnalysisReport {
    let mut report = AnalysisReport::new(format!("Position #{}", position.id));
    let (sym0, sym1) = (&position.token0_symbol, &position.token1_symbol);

    report.push("Position ID", text(&position.id.0));
    report.push("Owner", text(&position.owner));
    report.push("Pair", DisplayValue::Text(format!("{sym0}/{sym1}")));
    report.push("Liquidity", text(&position.liquidity));
    report.push(format!("Deposited {sym0}"), text(&position.deposited_token0));
    report.push(format!("Deposited {sym1}"), text(&position.deposited_token1));
    report.push(format!("Withdrawn {sym0}"), text(&position.withdrawn_token0));
    report.push(format!("Withdrawn {sym1}"), text(&position.withdrawn_token1));
    report.push(
        format!("Collected fees {sym0}"),
        text(&position.collected_fees_token0),
    );
    report.push(
        format!("Collected fees {sym1}"),
        text(&position.collected_fees_token1),
    );
    report.push(
        "Fee tier (%)",
        DisplayValue::decimal(Percentage::from_fee_tier(position.fee_tier).0),
    );
    report.push(
        "Current tick",
        position
            .current_tick
            .map(|t| DisplayValue::Integer(i64::from(t)))
            .unwrap_or_else(|| text("n/a")),
    );
    report.push("Sqrt price", text(&position.sqrt_price));
    report.push("Tick lower", DisplayValue::Integer(i64::from(position.tick_lower)));
    report.push("Tick upper", DisplayValue::Integer(i64::from(position.tick_upper)));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PositionId;
    use crate::value_objects::Price;
    use rust_decimal_macros::dec;

    fn valuation() -> PoolValuation {
        PoolValuation {
            balance_a: dec!(5),
            balance_b: dec!(10000),
            price_a: Price::new(dec!(3000)),
            price_b: Price::new(dec!(1)),
            tvl: dec!(25000),
        }
    }

    #[test]
    fn test_assemble_row_order() {
        let weth = TokenMetadata::new("0x4200000000000000000000000000000000000006", "WETH", 18);
        let usdc = TokenMetadata::new("0xd9aAEc86B65D86f6A7B5B1b0c42FFA531710b6CA", "USDbC", 6);
        let il = ImpermanentLoss::for_ratio(dec!(4), dec!(25000)).unwrap();

        let report = assemble(&weth, &usdc, &valuation(), &il);
        let metrics: Vec<&str> = report.metrics().collect();
        assert_eq!(
            metrics,
            vec![
                "Token A",
                "Token B",
                "Balance A",
                "Balance B",
                "Price A (USD)",
                "Price B (USD)",
                "TVL (USD)",
                "Simulated IL (%)",
                "Price change ratio",
                "IL on TVL (USD)",
            ]
        );
        assert_eq!(report.get("Token A"), Some(&DisplayValue::Text("WETH".into())));
        assert_eq!(report.get("TVL (USD)").and_then(DisplayValue::as_f64), Some(25000.0));
        assert_eq!(
            report.get("Simulated IL (%)").and_then(DisplayValue::as_f64),
            Some(-20.0)
        );
        assert_eq!(
            report.get("IL on TVL (USD)").and_then(DisplayValue::as_f64),
            Some(-5000.0)
        );
    }

    #[test]
    fn test_assemble_position_passes_fields_through() {
        let position = PositionRecord {
            id: PositionId("12345".into()),
            owner: "0xabc".into(),
            token0_symbol: "WETH".into(),
            token1_symbol: "USDC".into(),
            liquidity: "123456789".into(),
            deposited_token0: "1.5".into(),
            deposited_token1: "4200.25".into(),
            withdrawn_token0: "0".into(),
            withdrawn_token1: "0".into(),
            collected_fees_token0: "0.01".into(),
            collected_fees_token1: "12.5".into(),
            fee_tier: 3000,
            current_tick: Some(-195000),
            sqrt_price: "4478185458219376527171862".into(),
            tick_lower: -200000,
            tick_upper: -190000,
        };

        let report = assemble_position(&position);
        assert_eq!(report.title, "Position #12345");
        assert_eq!(report.get("Pair"), Some(&DisplayValue::Text("WETH/USDC".into())));
        assert_eq!(
            report.get("Deposited USDC"),
            Some(&DisplayValue::Text("4200.25".into()))
        );
        assert_eq!(report.get("Fee tier (%)").and_then(DisplayValue::as_f64), Some(0.3));
        assert_eq!(report.get("Current tick"), Some(&DisplayValue::Integer(-195000)));
        assert_eq!(
            report.get("Sqrt price"),
            Some(&DisplayValue::Text("4478185458219376527171862".into()))
        );
    }
}
