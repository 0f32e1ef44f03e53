//! Command Line Interface for the LP Analyzer.
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use lp_analyzer_data::providers::{
    CachedChainProvider, CachedPriceOracle, CoinGeckoOracle, Erc20ChainProvider, SubgraphIndexer,
};
use lp_analyzer_data::{
    DataConfig, IlScenario, PoolAnalysisRequest, PoolAnalyzer, PositionInspector, TokenRequest,
};
use lp_analyzer_domain::entities::PositionId;
use lp_analyzer_domain::report::AnalysisReport;
use prettytable::{Table, format, row};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lp-analyzer")]
#[command(about = "Liquidity pool valuation and impermanent loss analyzer", long_about = None)]
struct Cli {
    /// Print the report as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a two-token pool and simulate impermanent loss
    Pool(PoolArgs),
    /// Show an indexed liquidity position
    Position {
        /// Position identifier (NFT token id)
        #[arg(long)]
        id: String,

        /// Subgraph endpoint (overrides POSITION_INDEXER_URL)
        #[arg(long)]
        indexer_url: Option<String>,
    },
}

#[derive(Args)]
struct PoolArgs {
    /// Use the WETH/USDbC pool on Base
    #[arg(long)]
    example: bool,

    /// Pool address holding the reserves
    #[arg(long, required_unless_present = "example")]
    pool: Option<String>,

    /// Token A contract address
    #[arg(long, required_unless_present = "example")]
    token_a: Option<String>,

    /// Token B contract address
    #[arg(long, required_unless_present = "example")]
    token_b: Option<String>,

    /// Price oracle id of token A (e.g. ethereum)
    #[arg(long, required_unless_present = "example")]
    price_id_a: Option<String>,

    /// Price oracle id of token B (e.g. usd-coin)
    #[arg(long, required_unless_present = "example")]
    price_id_b: Option<String>,

    /// Hypothetical price change ratio of token A
    #[arg(long, default_value = "2.0")]
    price_ratio: Decimal,

    /// Entry price of token A in USD; the ratio is taken against the live price
    #[arg(long, conflicts_with = "price_ratio")]
    entry_price: Option<Decimal>,

    /// JSON-RPC endpoint (overrides RPC_URL)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Price API base URL (overrides PRICE_API_URL)
    #[arg(long)]
    price_api_url: Option<String>,
}

impl PoolArgs {
    fn to_request(&self) -> Result<PoolAnalysisRequest> {
        let scenario = match self.entry_price {
            Some(entry) => IlScenario::EntryPrice(entry),
            None => IlScenario::Ratio(self.price_ratio),
        };

        if self.example {
            return Ok(PoolAnalysisRequest {
                scenario,
                ..PoolAnalysisRequest::example()
            });
        }

        let (Some(pool), Some(token_a), Some(token_b), Some(id_a), Some(id_b)) = (
            &self.pool,
            &self.token_a,
            &self.token_b,
            &self.price_id_a,
            &self.price_id_b,
        ) else {
            bail!("--pool, --token-a, --token-b, --price-id-a and --price-id-b are required");
        };

        Ok(PoolAnalysisRequest {
            pool_address: pool.clone(),
            token_a: TokenRequest::new(token_a, id_a),
            token_b: TokenRequest::new(token_b, id_b),
            scenario,
        })
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli.command).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => fail(&anyhow::Error::from(e)),
                }
            } else {
                println!("{}", report.title);
                print!("{}", render_table(&report));
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &anyhow::Error) -> ! {
    eprintln!("Error: {error:#}");
    std::process::exit(1);
}

async fn run(command: &Commands) -> Result<AnalysisReport> {
    let mut config = DataConfig::from_env().context("invalid configuration")?;

    match command {
        Commands::Pool(args) => {
            if let Some(url) = &args.rpc_url {
                config.rpc_url = url.clone();
            }
            if let Some(url) = &args.price_api_url {
                config.price_api_url = url.clone();
            }
            let request = args.to_request()?;

            info!(rpc = %config.rpc_url, "Connecting to chain");
            let chain = CachedChainProvider::new(
                Erc20ChainProvider::connect(&config.rpc_url)?,
                config.cache_ttl,
            );
            let oracle = CachedPriceOracle::new(
                CoinGeckoOracle::new(&config.price_api_url, config.http_timeout)?,
                config.cache_ttl,
            );

            let report = PoolAnalyzer::new(chain, oracle).analyze(&request).await?;
            Ok(report)
        }
        Commands::Position { id, indexer_url } => {
            if let Some(url) = indexer_url {
                config.position_indexer_url = url.clone();
            }

            let indexer = SubgraphIndexer::new(&config.position_indexer_url, config.http_timeout)?;
            let report = PositionInspector::new(indexer)
                .inspect(&PositionId::from(id.as_str()))
                .await?;
            Ok(report)
        }
    }
}

fn render_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Metric", "Value"]);
    for metric_row in &report.rows {
        table.add_row(row![metric_row.metric, metric_row.value]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn pool_args(args: &[&str]) -> PoolArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Pool(args) => args,
            Commands::Position { .. } => panic!("expected pool command"),
        }
    }

    #[test]
    fn test_example_request() {
        let request = pool_args(&["lp-analyzer", "pool", "--example"])
            .to_request()
            .unwrap();
        assert_eq!(request.pool_address, PoolAnalysisRequest::example().pool_address);
        assert_eq!(request.scenario, IlScenario::Ratio(Decimal::TWO));
    }

    #[test]
    fn test_explicit_request_with_entry_price() {
        let request = pool_args(&[
            "lp-analyzer",
            "pool",
            "--pool",
            "0xpool",
            "--token-a",
            "0xa",
            "--token-b",
            "0xb",
            "--price-id-a",
            "ethereum",
            "--price-id-b",
            "usd-coin",
            "--entry-price",
            "1500",
        ])
        .to_request()
        .unwrap();

        assert_eq!(request.token_a, TokenRequest::new("0xa", "ethereum"));
        assert_eq!(
            request.scenario,
            IlScenario::EntryPrice(Decimal::from_u32(1500).unwrap())
        );
    }

    #[test]
    fn test_pool_requires_addresses_without_example() {
        assert!(Cli::try_parse_from(["lp-analyzer", "pool", "--token-a", "0xa"]).is_err());
    }

    #[test]
    fn test_ratio_and_entry_price_conflict() {
        assert!(
            Cli::try_parse_from([
                "lp-analyzer",
                "pool",
                "--example",
                "--price-ratio",
                "3",
                "--entry-price",
                "1500",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::try_parse_from(["lp-analyzer", "position", "--id", "42", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_render_table_lists_every_metric() {
        let report = lp_analyzer_domain::report::assemble_position(
            &lp_analyzer_domain::entities::PositionRecord {
                id: PositionId::from("42"),
                owner: "0xowner".to_string(),
                token0_symbol: "WETH".to_string(),
                token1_symbol: "USDC".to_string(),
                liquidity: "1000".to_string(),
                deposited_token0: "1".to_string(),
                deposited_token1: "3000".to_string(),
                withdrawn_token0: "0".to_string(),
                withdrawn_token1: "0".to_string(),
                collected_fees_token0: "0".to_string(),
                collected_fees_token1: "0".to_string(),
                fee_tier: 3000,
                current_tick: None,
                sqrt_price: "1".to_string(),
                tick_lower: -10,
                tick_upper: 10,
            },
        );
        let table = render_table(&report);
        for metric in report.metrics() {
            assert!(table.contains(metric), "{metric} missing from table");
        }
        assert!(table.contains("n/a"));
    }
}
