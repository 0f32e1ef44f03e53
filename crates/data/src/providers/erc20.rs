//! ERC-20 metadata and balance reads over JSON-RPC.

use super::ChainDataProvider;
use alloy::primitives::{Address, U256 as AlloyU256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use lp_analyzer_domain::entities::TokenMetadata;
use lp_analyzer_domain::{Error, Result};
use primitive_types::U256;
use std::str::FromStr;
use tracing::debug;

// ERC-20 ABI (minimal)
mod abi {
    alloy::sol! {
        #[sol(rpc)]
        interface IERC20 {
            function symbol() external view returns (string);
            function decimals() external view returns (uint8);
            function balanceOf(address owner) external view returns (uint256);
        }
    }
}

use abi::IERC20;

/// Parses a hex account address, ignoring surrounding whitespace and case.
///
/// # Errors
/// Returns `Error::InvalidInput` if `input` is not a 20-byte hex address.
pub fn parse_address(input: &str) -> Result<Address> {
    Address::from_str(input.trim())
        .map_err(|e| Error::invalid_input(format!("invalid address '{}': {e}", input.trim())))
}

/// EIP-55 checksum form of `address`.
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}

fn to_domain_u256(value: AlloyU256) -> U256 {
    U256::from_big_endian(&value.to_be_bytes::<32>())
}

/// Chain data provider backed by an alloy JSON-RPC provider.
pub struct Erc20ChainProvider<P> {
    provider: P,
}

impl<P: Provider> Erc20ChainProvider<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl Erc20ChainProvider<DynProvider> {
    /// Connects to an HTTP JSON-RPC endpoint.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `rpc_url` is not a valid URL.
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let url: reqwest::Url = rpc_url
            .parse()
            .map_err(|e| Error::invalid_input(format!("invalid RPC URL '{rpc_url}': {e}")))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self::new(provider))
    }
}

#[async_trait]
impl<P: Provider + Send + Sync> ChainDataProvider for Erc20ChainProvider<P> {
    async fn token_metadata(&self, token: &str) -> Result<TokenMetadata> {
        let address = parse_address(token)?;
        let contract = IERC20::new(address, &self.provider);

        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| Error::upstream(format!("symbol() on {address}: {e}")))?;
        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| Error::upstream(format!("decimals() on {address}: {e}")))?;

        debug!(token = %address, symbol = %symbol, decimals, "Fetched token metadata");
        Ok(TokenMetadata::new(to_checksum(&address), symbol, decimals))
    }

    async fn balance_of(&self, holder: &str, token: &str) -> Result<U256> {
        let holder = parse_address(holder)?;
        let token = parse_address(token)?;
        let contract = IERC20::new(token, &self.provider);

        let balance = contract
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| Error::upstream(format!("balanceOf({holder}) on {token}: {e}")))?;

        debug!(token = %token, holder = %holder, balance = %balance, "Fetched balance");
        Ok(to_domain_u256(balance))
    }
}
