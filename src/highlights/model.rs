use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::core::YearMonth;

/// Year-over-year growth bucket. Each stock gets at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTier {
    /// 30% up to (not including) 50%.
    Thirty,
    /// 50% up to (not including) 100%.
    Fifty,
    /// 100% and above.
    Hundred,
}

impl GrowthTier {
    /// The tier for a YoY percentage, if it reaches one.
    pub fn for_yoy(pct: f64) -> Option<Self> {
        if pct >= 100.0 {
            Some(Self::Hundred)
        } else if pct >= 50.0 {
            Some(Self::Fifty)
        } else if pct >= 30.0 {
            Some(Self::Thirty)
        } else {
            None
        }
    }
}

/// Why a stock made it into the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HighlightTag {
    /// Latest revenue beat every earlier month in the window.
    RecordHigh,
    /// Large year-over-year growth; `pct` is the actual growth.
    YoyGrowth { tier: GrowthTier, pct: f64 },
    /// Year-over-year decline of 30% or more; `pct` is negative.
    YoyDecline { pct: f64 },
}

impl fmt::Display for HighlightTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordHigh => f.write_str("record high"),
            Self::YoyGrowth { pct, .. } => write!(f, "YoY +{pct:.0}%"),
            Self::YoyDecline { pct } => write!(f, "YoY -{:.0}%", pct.abs()),
        }
    }
}

impl Serialize for HighlightTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A stock whose latest monthly revenue is worth reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRecord {
    pub stock_id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(rename = "revenue_formatted")]
    pub formatted_revenue: String,
    /// Rounded to two decimals.
    pub yoy_pct: Option<f64>,
    /// Rounded to two decimals.
    pub mom_pct: Option<f64>,
    pub is_record_high: bool,
    pub report_month: YearMonth,
    /// Never empty.
    pub tags: Vec<HighlightTag>,
}

impl HighlightRecord {
    /// The growth tier this record was tagged with, if any.
    pub fn growth_tier(&self) -> Option<GrowthTier> {
        self.tags.iter().find_map(|t| match t {
            HighlightTag::YoyGrowth { tier, .. } => Some(*tier),
            _ => None,
        })
    }

    /// YoY growth of 50% or more.
    pub fn is_yoy_star(&self) -> bool {
        self.yoy_pct.is_some_and(|p| p >= 50.0)
    }
}

/// Headline counts over the whole report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HighlightSummary {
    pub total_highlights: usize,
    pub record_highs: usize,
    pub yoy_over_50_pct: usize,
}

/// The ranked output of one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightReport {
    pub report_month: YearMonth,
    /// Record highs first, then by YoY descending; ties keep input order.
    pub highlights: Vec<HighlightRecord>,
    pub summary: HighlightSummary,
    /// At most ten, in ranking order.
    pub record_high_stocks: Vec<HighlightRecord>,
    /// At most ten with YoY of 50% or more, in ranking order.
    pub yoy_stars: Vec<HighlightRecord>,
    /// Stock ids whose provider call failed. Not part of the published artifact.
    #[serde(skip)]
    pub failed: Vec<String>,
}

/// The JSON envelope written by a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    pub timestamp: DateTime<FixedOffset>,
    pub source: &'static str,
    pub success: bool,
    pub data: Option<HighlightReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    pub(crate) fn started(at: DateTime<FixedOffset>) -> Self {
        Self {
            timestamp: at,
            source: "finmind",
            success: false,
            data: None,
            error: None,
        }
    }

    pub(crate) fn fail(&mut self, err: impl fmt::Display) {
        self.success = false;
        self.error = Some(err.to_string());
    }
}
