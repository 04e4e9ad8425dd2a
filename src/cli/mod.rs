//! Command-line interface for a one-shot highlight batch.

pub mod logging;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Asia;
use clap::Parser;
use revenue_highlights::{
    FmClient, FmError, RecordBaseline, RevenueHighlights, StockNames, Watchlist,
};

use logging::LogFormat;

/// Detect record-high and large year-over-year monthly revenue reports
#[derive(Parser, Debug)]
#[command(name = "revenue-highlights")]
#[command(version)]
pub struct Cli {
    /// Stock ids to analyse, in addition to any watchlist entries
    pub stocks: Vec<String>,

    /// TOML watchlist with `[tw_stocks]` core/swing entries
    #[arg(short, long)]
    pub watchlist: Option<PathBuf>,

    /// Persisted record-high file
    #[arg(long, default_value = "data/historical/revenue_records.json")]
    pub state: PathBuf,

    /// Output directory [default: data/raw/<today>]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Months of history fetched per stock
    #[arg(
        long,
        default_value_t = revenue_highlights::revenue::DEFAULT_MONTHS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub months: u32,

    /// Fail the batch when FINMIND_API_TOKEN is not set
    #[arg(long)]
    pub require_token: bool,

    /// Also compare against the persisted record, not just the fetched window
    #[arg(long)]
    pub persisted_baseline: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Runs the batch; `Ok(false)` means the batch reported failure.
pub async fn run(cli: Cli) -> Result<bool, FmError> {
    let mut names = StockNames::default();
    let mut stocks = Vec::new();

    if let Some(path) = &cli.watchlist {
        let watchlist = Watchlist::load(path)?;
        names.extend(watchlist.tw_names());
        stocks.extend(watchlist.tw_symbols());
    }
    stocks.extend(cli.stocks.iter().cloned());

    let mut seen = HashSet::new();
    stocks.retain(|s| seen.insert(s.clone()));
    if stocks.is_empty() {
        return Err(FmError::Data("no stock ids given".into()));
    }

    let client = FmClient::builder()
        .api_token_opt(std::env::var("FINMIND_API_TOKEN").ok())
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    let baseline = if cli.persisted_baseline {
        RecordBaseline::Persisted
    } else {
        RecordBaseline::Window
    };

    let output_dir = cli.output_dir.unwrap_or_else(|| {
        let today = Utc::now().with_timezone(&Asia::Taipei).date_naive();
        PathBuf::from("data/raw").join(today.to_string())
    });

    tracing::info!(stocks = stocks.len(), "analysing monthly revenue");

    let result = RevenueHighlights::new(client)
        .months(cli.months)
        .require_credentials(cli.require_token)
        .record_baseline(baseline)
        .names(names)
        .fetch_all(&stocks, &cli.state, &output_dir)
        .await;

    match (&result.data, &result.error) {
        (_, Some(err)) => println!("revenue highlights failed: {err}"),
        (Some(report), None) => println!(
            "{} {}: {} highlights, {} record highs, {} with YoY >= 50% -> {}",
            report.report_month,
            if report.failed.is_empty() { "ok" } else { "partial" },
            report.summary.total_highlights,
            report.summary.record_highs,
            report.summary.yoy_over_50_pct,
            output_dir.display(),
        ),
        (None, None) => println!("revenue highlights produced no data"),
    }

    Ok(result.success)
}
