use rust_decimal::Decimal;
use serde::Deserialize;

/// The envelope FinMind wraps every `api/v4/data` response in.
#[derive(Deserialize)]
pub(crate) struct DataEnvelope {
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<i64>,
    #[serde(default)]
    pub(crate) data: Option<Vec<RevenueRow>>,
}

/// One row of the `TaiwanStockMonthRevenue` dataset.
#[derive(Deserialize)]
pub(crate) struct RevenueRow {
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    pub(crate) stock_id: Option<String>,
    #[serde(default)]
    pub(crate) revenue: Option<Decimal>,
    #[serde(default)]
    pub(crate) revenue_year_growth_rate: Option<f64>,
    #[serde(default)]
    pub(crate) revenue_month_growth_rate: Option<f64>,
}
