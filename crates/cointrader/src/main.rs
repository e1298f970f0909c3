use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*, TraceLevel};
use cointrader_dex::normalize::normalize_all;
use cointrader_dex::prelude::*;
use cointrader_dex::series::Retry;
use dotenv::dotenv;
use std::time::Duration;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod dash;
mod ui;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    let config = Config::from_env()?;
    let client = DexClient::new(config)?;

    // cli framework:
    // "> cointrader <COMMAND>"
    match &cli.command {
        // "> cointrader dash"
        Dash => dash::run(&client).await?,

        // "> cointrader trending [--limit N]"
        Trending { limit } => {
            let limit = limit.unwrap_or(client.config().top_n);
            let pb = ui::spinner("Scraping trending pairs");
            let records = client.trending(limit).await;
            pb.finish_and_clear();

            let coins = normalize_all(&records);
            ui::heading(&format!("🔥 Top {} Trending Tokens", coins.len()));
            ui::print_table(&coins);
        }

        // "> cointrader search <QUERY> [--limit N]"
        Search { query, limit } => {
            let limit = limit.unwrap_or(client.config().search_max);
            let pb = ui::spinner(&format!("Searching for {query:?}"));
            let hits = client.search(query, limit).await;
            pb.finish_and_clear();

            let coins = normalize_all(&hits);
            ui::heading(&format!("🔍 {} matches for {query:?}", coins.len()));
            ui::print_table(&coins);
        }

        // "> cointrader chart <CHAIN_OR_ID> [PAIR] [--retries N] [--delay S]"
        Chart {
            chain_or_id,
            pair,
            retries,
            delay,
            width,
            height,
        } => {
            let retry = Retry {
                attempts: retries.unwrap_or(client.config().retries),
                delay: delay
                    .map(Duration::from_secs)
                    .unwrap_or(client.config().retry_delay),
            };
            let pb = ui::spinner("Fetching price history");
            let points = client.series(chain_or_id, pair.as_deref(), retry).await;
            pb.finish_and_clear();

            let title = match pair {
                Some(pair) => format!("{chain_or_id}/{pair}"),
                None => chain_or_id.clone(),
            };
            ui::print_chart(&render_chart(&points, &title, *width, *height));
        }
    }

    Ok(())
}
