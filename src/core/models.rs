use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::FmError;

/* ----- YEAR-MONTH (report period of a monthly revenue figure) ----- */

/// A calendar month, rendered and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a `YearMonth`, returning `None` if `month` is not in `1..=12`.
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FmError;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date (the day is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FmError::Data(format!("invalid year-month: {s:?}"));
        let head = s.get(..7).ok_or_else(bad)?;
        if s.len() > 7 {
            NaiveDate::parse_from_str(s.get(..10).ok_or_else(bad)?, "%Y-%m-%d")
                .map_err(|_| bad())?;
        }
        let (y, m) = head.split_once('-').ok_or_else(bad)?;
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        Self::new(year, month).ok_or_else(bad)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/* ----- MONTHLY REVENUE (shared by revenue/ and highlights/) ----- */

/// One monthly revenue report for a stock, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenueRecord {
    /// The stock identifier (e.g., `2330`).
    pub stock_id: String,
    /// The month the figure was reported in.
    pub report_month: YearMonth,
    /// Monthly revenue in provider currency units (TWD). Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Year-over-year growth, in percent.
    pub yoy_pct: Option<f64>,
    /// Month-over-month growth, in percent.
    pub mom_pct: Option<f64>,
}

/* ----- CLOCK (Taiwan market local time) ----- */

/// The current instant in Asia/Taipei, as a fixed-offset timestamp.
pub(crate) fn taipei_now() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::Utc::now()
        .with_timezone(&chrono_tz::Asia::Taipei)
        .fixed_offset()
}

/// Today's date in Asia/Taipei.
pub(crate) fn taipei_today() -> NaiveDate {
    taipei_now().date_naive()
}
