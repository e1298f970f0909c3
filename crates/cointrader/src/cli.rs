use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, ignore_case = true, default_value = "WARN")]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse trending tokens (or search for one) and chart the chosen pair.
    Dash,

    /// Print the trending table.
    Trending {
        /// Number of rows to scrape (defaults to COINTRADER_TOP_N).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search pairs by token name or symbol.
    Search {
        query: String,

        /// Maximum number of matches (defaults to COINTRADER_SEARCH_MAX).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Chart the price history of a pair (CHAIN PAIR) or a coin id (ID).
    Chart {
        chain_or_id: String,

        pair: Option<String>,

        /// Attempts made while the endpoint keeps rate limiting.
        #[arg(long)]
        retries: Option<u32>,

        /// Seconds to wait after a rate limited attempt.
        #[arg(long)]
        delay: Option<u64>,

        /// Chart width in columns.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..))]
        width: u16,

        /// Chart height in rows.
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(1..))]
        height: u16,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}
