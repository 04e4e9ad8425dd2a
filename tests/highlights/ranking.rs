use revenue_highlights::{
    GrowthTier, HighlightRecord, HighlightReport, HighlightSummary, HighlightTag,
    highlights::SUBLIST_CAP,
};
use rust_decimal::Decimal;

use crate::common::month;

fn hl(stock_id: &str, record: bool, yoy: Option<f64>) -> HighlightRecord {
    let mut tags = Vec::new();
    if record {
        tags.push(HighlightTag::RecordHigh);
    }
    if let Some(pct) = yoy
        && let Some(tier) = GrowthTier::for_yoy(pct)
    {
        tags.push(HighlightTag::YoyGrowth { tier, pct });
    }
    HighlightRecord {
        stock_id: stock_id.to_string(),
        display_name: stock_id.to_string(),
        revenue: Decimal::from(1_000),
        formatted_revenue: "1,000".to_string(),
        yoy_pct: yoy,
        mom_pct: None,
        is_record_high: record,
        report_month: month("2024-03"),
        tags,
    }
}

fn ids(list: &[HighlightRecord]) -> Vec<&str> {
    list.iter().map(|h| h.stock_id.as_str()).collect()
}

#[test]
fn record_highs_rank_before_growth() {
    let report = HighlightReport::from_highlights(
        vec![
            hl("A", true, Some(10.0)),
            hl("B", false, Some(80.0)),
            hl("C", true, Some(5.0)),
        ],
        month("2024-04"),
    );

    assert_eq!(ids(&report.highlights), ["A", "C", "B"]);
    assert_eq!(ids(&report.record_high_stocks), ["A", "C"]);
    assert_eq!(ids(&report.yoy_stars), ["B"]);
    assert_eq!(
        report.summary,
        HighlightSummary {
            total_highlights: 3,
            record_highs: 2,
            yoy_over_50_pct: 1,
        }
    );
    assert_eq!(report.report_month, month("2024-03"));
    assert!(report.failed.is_empty());
}

#[test]
fn missing_yoy_sorts_as_zero_and_ties_keep_input_order() {
    let report = HighlightReport::from_highlights(
        vec![
            hl("R1", true, None),
            hl("R2", true, Some(-5.0)),
            hl("R3", true, Some(0.0)),
            hl("R4", true, None),
        ],
        month("2024-04"),
    );

    assert_eq!(ids(&report.highlights), ["R1", "R3", "R4", "R2"]);
}

#[test]
fn sub_lists_are_capped_but_counts_are_not() {
    let highlights = (0..15)
        .map(|i| hl(&format!("S{i:02}"), true, Some(200.0 - f64::from(i))))
        .collect();

    let report = HighlightReport::from_highlights(highlights, month("2024-04"));

    assert_eq!(report.highlights.len(), 15);
    assert_eq!(report.record_high_stocks.len(), SUBLIST_CAP);
    assert_eq!(report.yoy_stars.len(), SUBLIST_CAP);
    assert_eq!(report.summary.record_highs, 15);
    assert_eq!(report.summary.yoy_over_50_pct, 15);
    assert_eq!(report.record_high_stocks[0].stock_id, "S00");
    assert_eq!(report.record_high_stocks[9].stock_id, "S09");
}

#[test]
fn yoy_star_threshold_is_inclusive() {
    let report = HighlightReport::from_highlights(
        vec![hl("AT", false, Some(50.0)), hl("BELOW", false, Some(49.99))],
        month("2024-04"),
    );
    assert_eq!(ids(&report.yoy_stars), ["AT"]);
    assert_eq!(report.summary.yoy_over_50_pct, 1);
}

#[test]
fn empty_report_uses_the_fallback_month() {
    let report = HighlightReport::from_highlights(Vec::new(), month("2024-04"));

    assert_eq!(report.report_month, month("2024-04"));
    assert_eq!(report.summary, HighlightSummary::default());
    assert!(report.record_high_stocks.is_empty());
    assert!(report.yoy_stars.is_empty());
}
