//! Monthly revenue highlights: record highs and large year-over-year moves.
//!
//! [`RevenueHighlights`] drives a batch: it fetches each stock's series, runs the
//! [`Detector`] against a [`HistoricalStore`], ranks the results and, through
//! [`RevenueHighlights::fetch_all`], persists the store and writes the report.

mod detect;
mod format;
mod model;
mod names;
mod rank;
mod store;

pub use detect::{Detector, RecordBaseline};
pub use format::{MagnitudeTier, RevenueFormatter};
pub use model::{
    FetchResult, GrowthTier, HighlightRecord, HighlightReport, HighlightSummary, HighlightTag,
};
pub use names::StockNames;
pub use rank::{SUBLIST_CAP, ranking};
pub use store::{HistoricalRecord, HistoricalStore};

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::core::{
    FmClient, FmError, MonthlyRevenueRecord, RevenueRequest, RevenueService, YearMonth,
    models::{taipei_now, taipei_today},
};
use crate::revenue::{DEFAULT_MONTHS, relative_window};

/// File name of the report written by [`RevenueHighlights::fetch_all`].
pub const OUTPUT_FILE: &str = "tw_revenue_highlights.json";

/// Runs highlight detection over a list of stocks, one at a time.
pub struct RevenueHighlights<S = FmClient> {
    service: S,
    months: u32,
    as_of: Option<DateTime<FixedOffset>>,
    require_credentials: bool,
    baseline: RecordBaseline,
    formatter: RevenueFormatter,
    names: StockNames,
}

impl<S: RevenueService> RevenueHighlights<S> {
    /// Creates a batch runner over `service` with a 36-month window.
    pub fn new(service: S) -> Self {
        Self {
            service,
            months: DEFAULT_MONTHS,
            as_of: None,
            require_credentials: false,
            baseline: RecordBaseline::Window,
            formatter: RevenueFormatter::default(),
            names: StockNames::default(),
        }
    }

    /// Sets how many months of history each stock is fetched with.
    #[must_use]
    pub const fn months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    /// Pins "now": the end of the fetch window, the fallback report month and the
    /// timestamp on updated records.
    #[must_use]
    pub const fn as_of(mut self, now: DateTime<FixedOffset>) -> Self {
        self.as_of = Some(now);
        self
    }

    /// Fails the whole batch up front when the service has no credentials.
    #[must_use]
    pub const fn require_credentials(mut self, yes: bool) -> Self {
        self.require_credentials = yes;
        self
    }

    #[must_use]
    pub const fn record_baseline(mut self, baseline: RecordBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: RevenueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn names(mut self, names: StockNames) -> Self {
        self.names = names;
        self
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.as_of.unwrap_or_else(taipei_now)
    }

    fn today(&self) -> NaiveDate {
        self.as_of.map_or_else(taipei_today, |t| t.date_naive())
    }

    /// The request window used for every stock in the batch.
    pub fn request(&self) -> RevenueRequest {
        relative_window(self.today(), self.months)
    }

    /// Fetches, detects and ranks highlights for `stock_ids`, updating `store` in memory.
    ///
    /// A failed fetch for one stock is logged and counts as "no data"; the stock id is
    /// listed in [`HighlightReport::failed`]. The store is not written to disk.
    ///
    /// # Errors
    ///
    /// Returns `FmError::MissingCredentials` if credentials are required and the
    /// service has none. Per-stock failures never fail the batch.
    pub async fn get_highlights<I>(
        &self,
        stock_ids: I,
        store: &mut HistoricalStore,
    ) -> Result<HighlightReport, FmError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.require_credentials && !self.service.has_credentials() {
            return Err(FmError::MissingCredentials(
                "FINMIND_API_TOKEN is not set".into(),
            ));
        }

        let req = self.request();
        let mut detector = Detector::new(store, &self.names, &self.formatter)
            .baseline(self.baseline)
            .at(self.now());

        let mut highlights = Vec::new();
        let mut failed = Vec::new();

        for stock_id in stock_ids {
            let stock_id = stock_id.as_ref();
            let series = match self.fetch_series(stock_id, req).await {
                Ok(series) => series,
                Err(e) => {
                    tracing::warn!(stock_id, error = %e, "revenue fetch failed; skipping stock");
                    failed.push(stock_id.to_string());
                    Vec::new()
                }
            };

            if let Some(highlight) = detector.detect(stock_id, &series) {
                highlights.push(highlight);
            }
        }

        let mut report =
            HighlightReport::from_highlights(highlights, YearMonth::from_date(self.today()));
        report.failed = failed;

        tracing::info!(
            highlights = report.summary.total_highlights,
            record_highs = report.summary.record_highs,
            failed = report.failed.len(),
            "revenue highlights ready"
        );
        Ok(report)
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn fetch_series(
        &self,
        stock_id: &str,
        req: RevenueRequest,
    ) -> Result<Vec<MonthlyRevenueRecord>, FmError> {
        let series = self.service.fetch_month_revenue(stock_id, req).await?;
        if series.is_empty() {
            tracing::debug!("provider returned no revenue rows");
        }
        Ok(series)
    }

    /// Runs a full batch: load the store from `state_path`, detect highlights, save the
    /// store once, and write [`OUTPUT_FILE`] into `output_dir`.
    ///
    /// Never returns an error; batch-level failures are reported through
    /// `success: false` and `error` on the returned envelope.
    pub async fn fetch_all<I>(
        &self,
        stock_ids: I,
        state_path: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> FetchResult
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut result = FetchResult::started(self.now());
        let mut store = HistoricalStore::load(state_path.as_ref());

        let report = match self.get_highlights(stock_ids, &mut store).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "revenue highlight batch failed");
                result.fail(e);
                return result;
            }
        };

        result.data = Some(report);
        result.success = true;

        if let Err(e) = store.save(state_path.as_ref()) {
            tracing::error!(error = %e, "failed to save revenue records");
            result.fail(e);
            return result;
        }

        if let Err(e) = write_output(output_dir.as_ref(), &result) {
            tracing::error!(error = %e, "failed to write revenue highlights");
            result.fail(e);
        }
        result
    }
}

fn write_output(dir: &Path, result: &FetchResult) -> Result<(), FmError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(OUTPUT_FILE);
    fs::write(&path, serde_json::to_string_pretty(result)?)?;
    tracing::info!(path = %path.display(), "wrote revenue highlights");
    Ok(())
}
