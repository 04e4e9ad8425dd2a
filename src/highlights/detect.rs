use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use super::{
    format::RevenueFormatter,
    model::{GrowthTier, HighlightRecord, HighlightTag},
    names::StockNames,
    store::HistoricalStore,
};
use crate::core::{MonthlyRevenueRecord, models::taipei_now};

/// YoY at or below this is tagged as a decline.
const DECLINE_THRESHOLD: f64 = -30.0;

/// What the latest month is compared against when deciding on a record high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordBaseline {
    /// Only the earlier months of the fetched window.
    ///
    /// A stock whose all-time high is older than the window can be flagged again.
    #[default]
    Window,
    /// The earlier months of the window and the persisted high-water mark.
    Persisted,
}

/// Decides whether a stock's latest monthly report is a highlight.
///
/// Record highs are written into the borrowed [`HistoricalStore`]; persisting it is
/// up to the caller.
pub struct Detector<'a> {
    store: &'a mut HistoricalStore,
    names: &'a StockNames,
    formatter: &'a RevenueFormatter,
    baseline: RecordBaseline,
    now: Option<DateTime<FixedOffset>>,
}

impl<'a> Detector<'a> {
    pub fn new(
        store: &'a mut HistoricalStore,
        names: &'a StockNames,
        formatter: &'a RevenueFormatter,
    ) -> Self {
        Self {
            store,
            names,
            formatter,
            baseline: RecordBaseline::Window,
            now: None,
        }
    }

    #[must_use]
    pub const fn baseline(mut self, baseline: RecordBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Timestamp written to updated store entries. Defaults to the current time.
    #[must_use]
    pub const fn at(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }

    /// Inspects `series` (ascending by month; not re-sorted) and returns a highlight
    /// for its last element, or `None` when nothing about it is notable.
    pub fn detect(
        &mut self,
        stock_id: &str,
        series: &[MonthlyRevenueRecord],
    ) -> Option<HighlightRecord> {
        let (latest, prior) = series.split_last()?;

        let historical_max = self.historical_max(stock_id, prior);
        let is_record_high = historical_max > Decimal::ZERO && latest.revenue > historical_max;

        if is_record_high {
            tracing::info!(
                stock_id,
                revenue = %latest.revenue,
                previous = %historical_max,
                month = %latest.report_month,
                "new revenue record"
            );
            let at = self.now.unwrap_or_else(taipei_now);
            self.store
                .record(stock_id, latest.revenue, latest.report_month, at);
        }

        let tags = assign_tags(is_record_high, latest.yoy_pct);
        if tags.is_empty() {
            return None;
        }

        Some(HighlightRecord {
            stock_id: stock_id.to_string(),
            display_name: self.names.display_name(stock_id).to_string(),
            revenue: latest.revenue,
            formatted_revenue: self.formatter.format(latest.revenue),
            yoy_pct: latest.yoy_pct.map(round2),
            mom_pct: latest.mom_pct.map(round2),
            is_record_high,
            report_month: latest.report_month,
            tags,
        })
    }

    // Zero when there is no earlier month, which rules out a record high.
    fn historical_max(&self, stock_id: &str, prior: &[MonthlyRevenueRecord]) -> Decimal {
        let Some(window_max) = prior.iter().map(|r| r.revenue).max() else {
            return Decimal::ZERO;
        };
        match self.baseline {
            RecordBaseline::Window => window_max,
            RecordBaseline::Persisted => self
                .store
                .get(stock_id)
                .map_or(window_max, |r| r.record_high.max(window_max)),
        }
    }
}

fn assign_tags(is_record_high: bool, yoy_pct: Option<f64>) -> Vec<HighlightTag> {
    let mut tags = Vec::new();
    if is_record_high {
        tags.push(HighlightTag::RecordHigh);
    }
    if let Some(pct) = yoy_pct {
        if let Some(tier) = GrowthTier::for_yoy(pct) {
            tags.push(HighlightTag::YoyGrowth { tier, pct });
        } else if pct <= DECLINE_THRESHOLD {
            tags.push(HighlightTag::YoyDecline { pct });
        }
    }
    tags
}

// Formatting rounds the exact binary value half-to-even, so 34.125 becomes 34.12.
fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}
