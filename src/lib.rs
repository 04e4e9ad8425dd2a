//! revenue-highlights: Taiwan monthly revenue highlights from the FinMind API.
//!
//! Fetches each stock's monthly revenue series, flags record highs and large
//! year-over-year moves, keeps a persisted high-water mark per stock, and writes
//! a ranked report for downstream rendering.
//!
//! ```no_run
//! # use revenue_highlights::{FmClient, RevenueHighlights};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FmClient::from_env()?;
//! let result = RevenueHighlights::new(client)
//!     .fetch_all(["2330", "2454"], "data/historical/revenue_records.json", "data/raw")
//!     .await;
//! println!("success: {}", result.success);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod highlights;
pub mod revenue;
pub mod watchlist;

pub use crate::core::client::{Backoff, RetryConfig};
pub use crate::core::{
    FmClient, FmClientBuilder, FmError, MonthlyRevenueRecord, RevenueRequest, RevenueService,
    YearMonth,
};
pub use highlights::{
    Detector, FetchResult, GrowthTier, HighlightRecord, HighlightReport, HighlightSummary,
    HighlightTag, HistoricalRecord, HistoricalStore, MagnitudeTier, OUTPUT_FILE, RecordBaseline,
    RevenueFormatter, RevenueHighlights, StockNames,
};
pub use revenue::MonthlyRevenueBuilder;
pub use watchlist::Watchlist;
