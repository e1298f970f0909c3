use crate::ui;
use anyhow::Result;
use cointrader_dex::prelude::*;
use cointrader_dex::normalize::normalize_all;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input};
use tracing::{debug, info};

const CHART_WIDTH: u16 = 100;
const CHART_HEIGHT: u16 = 25;

/// Interactive dashboard: pick a trending token, or search for one, then show
/// its details and price chart. Repeats until the user declines.
pub async fn run(client: &DexClient) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        match choose(client, &theme).await? {
            Some(coin) => show(client, &coin).await,
            None => println!("Choose a trending token or search above."),
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Look up another token?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

/// One pass of the selection flow; `None` when nothing was chosen.
async fn choose(client: &DexClient, theme: &ColorfulTheme) -> Result<Option<NormalizedCoin>> {
    let top_n = client.config().top_n;
    let pb = ui::spinner("Scraping trending pairs");
    let trending = client.trending(top_n).await;
    pb.finish_and_clear();

    let selection = Selection::from_coins(normalize_all(&trending));
    ui::heading(&format!("🔥 Top {} Trending Tokens", selection.len()));
    if let Some(coin) = prompt(theme, "Select from Trending:", &selection)? {
        return Ok(Some(coin));
    }

    ui::heading("🔍 Search by Name or Symbol");
    let query: String = Input::with_theme(theme)
        .with_prompt("Type to search…")
        .allow_empty(true)
        .interact_text()?;
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    let pb = ui::spinner(&format!("Searching for {query:?}"));
    let hits = client.search(query, client.config().search_max).await;
    pb.finish_and_clear();
    debug!("{} search hits for {query:?}", hits.len());

    let matches = Selection::from_coins(normalize_all(&hits));
    if matches.is_empty() {
        info!("no matches for {query:?}");
        return Ok(None);
    }
    prompt(theme, "Select from Matches:", &matches)
}

fn prompt(
    theme: &ColorfulTheme,
    title: &str,
    selection: &Selection,
) -> Result<Option<NormalizedCoin>> {
    let options = selection.options();
    let picked = FuzzySelect::with_theme(theme)
        .with_prompt(title)
        .items(&options)
        .default(0)
        .interact()?;
    Ok(selection.pick(picked).cloned())
}

async fn show(client: &DexClient, coin: &NormalizedCoin) {
    ui::print_coin(coin);

    let Some((chain, pair_id)) = coin.chart_target() else {
        debug!("{} has no pair id; skipping chart", coin.label);
        ui::print_chart(&ChartView::Unavailable);
        return;
    };

    let pb = ui::spinner("Fetching 5-day price history");
    let points = client.series_default(chain, Some(pair_id)).await;
    pb.finish_and_clear();

    let title = format!("5-Day Price Chart: {} ({})", coin.name, coin.symbol);
    ui::print_chart(&render_chart(&points, &title, CHART_WIDTH, CHART_HEIGHT));
}
