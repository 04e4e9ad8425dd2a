use std::cmp::Ordering;

use super::model::{HighlightRecord, HighlightReport, HighlightSummary};
use crate::core::YearMonth;

/// Length cap for `record_high_stocks` and `yoy_stars`.
pub const SUBLIST_CAP: usize = 10;

/// Record highs first, then YoY descending with a missing YoY counted as zero.
pub fn ranking(a: &HighlightRecord, b: &HighlightRecord) -> Ordering {
    b.is_record_high.cmp(&a.is_record_high).then_with(|| {
        b.yoy_pct
            .unwrap_or(0.0)
            .total_cmp(&a.yoy_pct.unwrap_or(0.0))
    })
}

impl HighlightReport {
    /// Ranks `highlights` (stable, so ties keep their order) and derives the summary
    /// and capped sub-lists. `fallback_month` is used when there are no highlights.
    pub fn from_highlights(mut highlights: Vec<HighlightRecord>, fallback_month: YearMonth) -> Self {
        highlights.sort_by(ranking);

        let record_high_stocks: Vec<_> = highlights
            .iter()
            .filter(|h| h.is_record_high)
            .take(SUBLIST_CAP)
            .cloned()
            .collect();
        let yoy_stars: Vec<_> = highlights
            .iter()
            .filter(|h| h.is_yoy_star())
            .take(SUBLIST_CAP)
            .cloned()
            .collect();

        let summary = HighlightSummary {
            total_highlights: highlights.len(),
            record_highs: highlights.iter().filter(|h| h.is_record_high).count(),
            yoy_over_50_pct: highlights.iter().filter(|h| h.is_yoy_star()).count(),
        };

        let report_month = highlights
            .first()
            .map_or(fallback_month, |h| h.report_month);

        Self {
            report_month,
            highlights,
            summary,
            record_high_stocks,
            yoy_stars,
            failed: Vec::new(),
        }
    }
}
