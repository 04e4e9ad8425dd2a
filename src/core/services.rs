use chrono::NaiveDate;

use crate::core::{FmError, MonthlyRevenueRecord};

/// Parameters for a single monthly-revenue request.
///
/// This decouples the highlight aggregator from `revenue::MonthlyRevenueBuilder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueRequest {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

/// A source of monthly revenue series.
///
/// This allows the highlight aggregator to be driven by something other than the live
/// FinMind API in tests. It is implemented by [`FmClient`](crate::FmClient).
pub trait RevenueService: Send + Sync {
    /// Fetches the monthly revenue series for `stock_id`, ascending by report month.
    ///
    /// `Ok(vec![])` means the provider confirmed there is no data; `Err` means the
    /// call itself failed.
    fn fetch_month_revenue<'a>(
        &'a self,
        stock_id: &'a str,
        req: RevenueRequest,
    ) -> core::pin::Pin<
        Box<
            dyn core::future::Future<Output = Result<Vec<MonthlyRevenueRecord>, FmError>>
                + Send
                + 'a,
        >,
    >;

    /// Whether the service is configured with credentials.
    fn has_credentials(&self) -> bool {
        true
    }
}
