use cointrader_dex::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const UNAVAILABLE: &str = "Chart data unavailable.";

/// Spinner shown while a request is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn heading(text: &str) {
    println!("\n{}", text.bold().underline());
}

fn coloured_pct(value: Option<&str>) -> String {
    let text = format_pct(value);
    match cointrader_dex::display::pct_sign(value) {
        Some(sign) if sign < 0.0 => text.red().to_string(),
        Some(_) => text.green().to_string(),
        None => text,
    }
}

/// One line per trending/search row: label, price & 24h change.
pub fn print_table(coins: &[NormalizedCoin]) {
    for (i, coin) in coins.iter().enumerate() {
        println!(
            "{:>4}  {:<48} {:>20} {:>10}",
            i + 1,
            coin.label,
            format_price(coin.price_usd.as_deref()),
            coloured_pct(coin.pct_24h.as_deref()),
        );
    }
}

/// Detail panel for the chosen token.
pub fn print_coin(coin: &NormalizedCoin) {
    println!("{}", "-".repeat(60).dimmed());
    if let Some(logo) = &coin.logo {
        println!("{} {}", "Logo:".dimmed(), logo);
    }
    println!("{}", format!("{} ({})", coin.name, coin.symbol).bold());
    println!(
        "{} `{}`   |   {} `{}`",
        "Chain:".bold(),
        coin.chain,
        "Pair ID:".bold(),
        coin.pair_id
    );
    println!(
        "{}  {}",
        "Current Price (USD):".bold(),
        format_price(coin.price_usd.as_deref())
    );
    println!("{}  {}", "24 h % Change:".bold(), coloured_pct(coin.pct_24h.as_deref()));
    println!("{}  {}", "7 d % Change:".bold(), coloured_pct(coin.pct_7d.as_deref()));
}

pub fn print_chart(view: &ChartView) {
    match view {
        ChartView::Rendered(lines) => {
            for line in lines {
                println!("{}", line.cyan());
            }
        }
        ChartView::Unavailable => eprintln!("{}", UNAVAILABLE.red()),
    }
}
