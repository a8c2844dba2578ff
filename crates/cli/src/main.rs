//! Command Line Interface for the swapboard engine.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use std::sync::Arc;
use swapboard_data::{ApiConfig, DexApiClient};
use swapboard_domain::{AssetCode, format_amount, format_usd};
use swapboard_engine::prelude::*;

#[derive(Parser)]
#[command(name = "swapboard")]
#[command(about = "Quote, swap and manage liquidity against a remote DEX API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available liquidity pools
    Pools,
    /// List your liquidity positions
    Positions,
    /// Fetch a swap quote without submitting
    Quote {
        /// Source asset (e.g. BRL)
        #[arg(short, long)]
        from: AssetCode,

        /// Destination asset (e.g. TKT)
        #[arg(short, long)]
        to: AssetCode,

        /// Amount of the source asset
        #[arg(short, long)]
        amount: String,
    },
    /// Quote and submit a swap
    Swap {
        /// Source asset
        #[arg(short, long)]
        from: AssetCode,

        /// Destination asset
        #[arg(short, long)]
        to: AssetCode,

        /// Amount of the source asset
        #[arg(short, long)]
        amount: String,
    },
    /// Deposit liquidity into a pool
    AddLiquidity {
        /// Pool identifier (e.g. TKT_USDC)
        #[arg(short, long)]
        pool: String,

        /// Asset-A deposit amount
        #[arg(long)]
        amount_a: String,

        /// Asset-B deposit amount; estimated from the reserve ratio when omitted
        #[arg(long)]
        amount_b: Option<String>,
    },
    /// Withdraw liquidity from a pool
    RemoveLiquidity {
        /// Pool identifier
        #[arg(short, long)]
        pool: String,

        /// Shares to withdraw
        #[arg(short, long)]
        shares: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env();
    let client = Arc::new(DexApiClient::new(config)?);

    match cli.command {
        Commands::Pools => {
            let pools = client.pools().await?;
            println!("✅ Fetched {} pools:", pools.len());

            let mut table = Table::new();
            table.add_row(row![
                "Pair", "Pool ID", "Reserves", "Price A", "Price B", "TVL"
            ]);
            for pool in pools {
                table.add_row(row![
                    pool.pair_label(),
                    pool.pool_id,
                    format!(
                        "{} {} + {} {}",
                        format_amount(pool.reserves_a),
                        pool.asset_a,
                        format_amount(pool.reserves_b),
                        pool.asset_b
                    ),
                    format_amount(pool.price_a),
                    format_amount(pool.price_b),
                    format_usd(pool.liquidity_usd),
                ]);
            }
            table.printstd();
        }
        Commands::Positions => {
            let positions = client.liquidity_positions().await?;
            if positions.is_empty() {
                println!("You have no liquidity positions.");
                return Ok(());
            }

            let mut table = Table::new();
            table.add_row(row!["Pool", "Shares", "Amount A", "Amount B", "Value", "APY"]);
            for position in positions {
                table.add_row(row![
                    position.pool_id,
                    format_amount(position.shares),
                    format_amount(position.asset_a_amount),
                    format_amount(position.asset_b_amount),
                    format_usd(position.value_usd),
                    format!("{:.2}%", position.apy),
                ]);
            }
            table.printstd();
        }
        Commands::Quote { from, to, amount } => {
            let session = swap_session(&client);
            session.set_from_asset(from).await;
            session.set_to_asset(to).await;
            session.set_amount(&amount).await;

            print_quote(&session.quote_view().await, from, to)?;
        }
        Commands::Swap { from, to, amount } => {
            let session = swap_session(&client);
            session.set_from_asset(from).await;
            session.set_to_asset(to).await;
            session.set_amount(&amount).await;

            print_quote(&session.quote_view().await, from, to)?;

            match session.submit().await {
                SubmitOutcome::Completed => println!("✅ Swap executed successfully"),
                SubmitOutcome::Failed => anyhow::bail!("swap submission failed"),
                SubmitOutcome::Invalid => {
                    anyhow::bail!("swap blocked: check the amount and asset pair")
                }
                SubmitOutcome::Rejected => anyhow::bail!("another submission is in flight"),
            }
        }
        Commands::AddLiquidity {
            pool,
            amount_a,
            amount_b,
        } => {
            let desk = LiquidityDesk::new(client.clone(), client.clone(), NotificationCenter::new());
            desk.refresh().await?;

            if !desk.select_pool(&pool).await {
                anyhow::bail!("unknown pool: {pool}");
            }
            // With both sides given, take them verbatim; otherwise let
            // the reserve ratio pre-fill the missing one.
            match amount_b {
                Some(amount_b) => desk.enter_amounts(&amount_a, &amount_b).await,
                None => desk.enter_amount_a(&amount_a).await,
            }

            let entry = desk.entry().await;
            println!(
                "🔍 Depositing {} + {} into {}...",
                entry.amount_a, entry.amount_b, pool
            );

            match desk.add_liquidity().await {
                SubmitOutcome::Completed => println!("✅ Liquidity added successfully"),
                SubmitOutcome::Failed => anyhow::bail!("the server rejected the deposit"),
                SubmitOutcome::Invalid => anyhow::bail!("fill in both deposit amounts"),
                SubmitOutcome::Rejected => anyhow::bail!("another submission is in flight"),
            }
        }
        Commands::RemoveLiquidity { pool, shares } => {
            let desk = LiquidityDesk::new(client.clone(), client.clone(), NotificationCenter::new());
            desk.refresh().await?;

            let shares = shares
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid share amount: {shares}"))?;

            match desk.remove_liquidity(&pool, shares).await {
                SubmitOutcome::Completed => println!("✅ Liquidity removed successfully"),
                SubmitOutcome::Failed => anyhow::bail!("the server rejected the withdrawal"),
                SubmitOutcome::Invalid => anyhow::bail!("share amount must be positive"),
                SubmitOutcome::Rejected => anyhow::bail!("another submission is in flight"),
            }
        }
    }

    Ok(())
}

fn swap_session(client: &Arc<DexApiClient>) -> SwapSession<DexApiClient, DexApiClient> {
    SwapSession::new(
        client.clone(),
        client.clone(),
        NotificationCenter::new(),
        Arc::new(NoRefresh),
    )
}

fn print_quote(view: &QuoteView, from: AssetCode, to: AssetCode) -> Result<()> {
    let Some(quote) = &view.quote else {
        anyhow::bail!("no quote available for {from} -> {to}");
    };

    println!("📊 Quote {from} -> {to}");
    println!("  Amount out:   {} {to}", format_amount(quote.amount_out));
    println!("  Trading fee:  {} {from}", format_amount(quote.fee));
    println!("  Price impact: {:.2}%", quote.price_impact_pct);
    let route: Vec<&str> = quote.route.iter().map(AssetCode::code).collect();
    println!("  Route:        {}", route.join(" -> "));

    if view.high_impact() {
        println!("⚠️  High price impact: this swap may incur significant loss due to low liquidity.");
    }
    Ok(())
}
