mod api;
mod wire;

use chrono::{Days, NaiveDate};

use crate::core::{
    FmClient, FmError, MonthlyRevenueRecord, RevenueRequest, RevenueService,
    client::RetryConfig, models::taipei_today,
};

/// Default look-back window, in months.
pub const DEFAULT_MONTHS: u32 = 36;

/// Days requested per month of look-back. Over-asks slightly so the window
/// always covers `months` whole reports.
const DAYS_PER_MONTH: u64 = 35;

/// A builder for fetching the monthly revenue series of a single stock.
///
/// By default the window ends today (Asia/Taipei) and reaches back 36 months.
#[derive(Clone)]
pub struct MonthlyRevenueBuilder {
    client: FmClient,
    stock_id: String,
    months: u32,
    period: Option<(NaiveDate, NaiveDate)>,
    as_of: Option<NaiveDate>,
    recent: Option<usize>,
    retry_override: Option<RetryConfig>,
}

impl MonthlyRevenueBuilder {
    /// Creates a new `MonthlyRevenueBuilder` for a given stock id.
    pub fn new(client: &FmClient, stock_id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            stock_id: stock_id.into(),
            months: DEFAULT_MONTHS,
            period: None,
            as_of: None,
            recent: None,
            retry_override: None,
        }
    }

    /// Sets a relative look-back window in months.
    ///
    /// This will override any previously set period using `between()`.
    #[must_use]
    pub const fn months(mut self, months: u32) -> Self {
        self.period = None;
        self.months = months;
        self
    }

    /// Sets an absolute window. `start` must be before `end`.
    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some((start, end));
        self
    }

    /// Anchors the relative window at `date` instead of today.
    #[must_use]
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Keeps only the last `n` records of the series.
    #[must_use]
    pub const fn recent(mut self, n: usize) -> Self {
        self.recent = Some(n);
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// The request window this builder will ask for.
    pub fn request(&self) -> RevenueRequest {
        match self.period {
            Some((start, end)) => RevenueRequest { start, end },
            None => relative_window(self.as_of.unwrap_or_else(taipei_today), self.months),
        }
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the HTTP or envelope status is not a
    /// success, or a row is missing its date or revenue.
    pub async fn fetch(self) -> Result<Vec<MonthlyRevenueRecord>, FmError> {
        let req = self.request();
        let mut rows = api::fetch_month_revenue(
            &self.client,
            &self.stock_id,
            req.start,
            req.end,
            self.retry_override.as_ref(),
        )
        .await?;

        if let Some(n) = self.recent
            && rows.len() > n
        {
            rows.drain(..rows.len() - n);
        }
        Ok(rows)
    }
}

/// The window `[end - months * 35 days, end]`. A zero `months` counts as one.
pub fn relative_window(end: NaiveDate, months: u32) -> RevenueRequest {
    let months = months.max(1);
    let start = end
        .checked_sub_days(Days::new(u64::from(months) * DAYS_PER_MONTH))
        .unwrap_or(NaiveDate::MIN);
    RevenueRequest { start, end }
}

impl RevenueService for FmClient {
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
    > {
        Box::pin(async move {
            MonthlyRevenueBuilder::new(self, stock_id)
                .between(req.start, req.end)
                .fetch()
                .await
        })
    }

    fn has_credentials(&self) -> bool {
        FmClient::has_credentials(self)
    }
}
