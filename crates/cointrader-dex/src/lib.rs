pub mod cache;
pub mod chart;
pub mod client;
pub mod config;
pub mod de;
pub mod display;
pub mod extract;
pub mod normalize;
pub mod schema;
pub mod search;
pub mod select;
pub mod series;
pub mod trending;

pub mod prelude {
    pub use crate::chart::{render_chart, ChartView};
    pub use crate::client::DexClient;
    pub use crate::config::Config;
    pub use crate::display::{format_pct, format_price};
    pub use crate::normalize::Normalize;
    pub use crate::schema::{NormalizedCoin, PricePoint, SearchHit, TrendingRecord};
    pub use crate::select::Selection;
}
