use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, Instrument};

use shopfront::api::dispatch_line;
use shopfront::app_system::{setup_tracing, ShopSystem};
use shopfront::clients::ShopClient;
use shopfront::config::ShopConfig;

/// In-memory shop service speaking newline-delimited JSON on stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "shopfront", version)]
struct Cli {
    /// TOML config file; falls back to SHOPFRONT_CONFIG.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a scripted walkthrough instead of reading requests.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ShopConfig::load(cli.config.as_deref()).context("loading configuration")?;

    // Setup tracing once for the entire application
    setup_tracing(&config.logging);

    let system = ShopSystem::new(&config).context("starting shop system")?;

    if cli.demo {
        run_demo(&system.shop_client).await;
    } else {
        serve_stdio(&system.shop_client).await.context("serving requests")?;
    }

    system.shutdown().await.context("shutting down")?;
    info!("Application completed successfully");
    Ok(())
}

/// Answers one JSON request per input line until stdin closes.
async fn serve_stdio(client: &ShopClient) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Reading requests from stdin");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = dispatch_line(client, line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }
    info!("Input closed");
    Ok(())
}

async fn run_demo(client: &ShopClient) {
    let span = tracing::info_span!("demo_cart");
    let filled = async {
        info!("Filling cart");
        client.add_item(101, 2).await?;
        client.add_item(104, 1).await?;
        client.add_item(101, 1).await
    }
    .instrument(span)
    .await;

    match filled {
        Ok(update) => info!(
            total_items = update.cart.total_items,
            total = %update.cart.total_price,
            "Cart filled"
        ),
        Err(e) => error!(error = %e, "Could not fill cart"),
    }

    let span = tracing::info_span!("demo_checkout");
    async {
        match client.checkout().await {
            Ok(order) => info!(total = %order.total, "Order placed"),
            Err(e) => error!(error = %e, "Checkout failed"),
        }

        info!("Ordering more USB-C hubs than are in stock");
        if let Err(e) = client.add_item(103, 3).await {
            error!(error = %e, "Could not add item");
        }
        match client.checkout().await {
            Ok(order) => info!(total = %order.total, "Order placed"),
            Err(e) => error!(error = %e, "Checkout failed (expected - not enough stock)"),
        }
    }
    .instrument(span)
    .await;
}
