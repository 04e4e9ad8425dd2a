use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    core::{
        FmClient, FmError, MonthlyRevenueRecord, YearMonth,
        client::{RetryConfig, constants::MONTH_REVENUE_DATASET},
        net,
    },
    revenue::wire::{DataEnvelope, RevenueRow},
};

const FINMIND_OK: i64 = 200;

pub(super) async fn fetch_month_revenue(
    client: &FmClient,
    stock_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<MonthlyRevenueRecord>, FmError> {
    if start >= end {
        return Err(FmError::InvalidDates);
    }

    let mut url = client.data_url()?;
    url.query_pairs_mut()
        .append_pair("dataset", MONTH_REVENUE_DATASET)
        .append_pair("data_id", stock_id)
        .append_pair("start_date", &start.format("%Y-%m-%d").to_string())
        .append_pair("end_date", &end.format("%Y-%m-%d").to_string());

    let req = client.authorize(client.http().get(url.clone()));
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        return Err(FmError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = net::get_text(resp, "month_revenue", stock_id, "json").await?;
    decode_month_revenue(&body, stock_id)
}

fn decode_month_revenue(
    body: &str,
    stock_id: &str,
) -> Result<Vec<MonthlyRevenueRecord>, FmError> {
    let envelope: DataEnvelope = serde_json::from_str(body)?;

    let status = envelope
        .status
        .ok_or_else(|| FmError::Data("missing envelope status".into()))?;
    if status != FINMIND_OK {
        return Err(FmError::Api {
            status,
            msg: envelope.msg.unwrap_or_else(|| "Unknown error".into()),
        });
    }

    envelope
        .data
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, row)| convert_row(i, row, stock_id))
        .collect()
}

fn convert_row(
    index: usize,
    row: RevenueRow,
    stock_id: &str,
) -> Result<MonthlyRevenueRecord, FmError> {
    let date = row
        .date
        .ok_or_else(|| FmError::Data(format!("row {index}: missing date")))?;
    let report_month: YearMonth = date
        .parse()
        .map_err(|_| FmError::Data(format!("row {index}: bad date {date:?}")))?;
    let revenue = row
        .revenue
        .ok_or_else(|| FmError::Data(format!("row {index}: missing revenue")))?;
    if revenue < Decimal::ZERO {
        return Err(FmError::Data(format!("row {index}: negative revenue {revenue}")));
    }

    Ok(MonthlyRevenueRecord {
        stock_id: row.stock_id.unwrap_or_else(|| stock_id.to_string()),
        report_month,
        revenue,
        yoy_pct: row.revenue_year_growth_rate.filter(|v| v.is_finite()),
        mom_pct: row.revenue_month_growth_rate.filter(|v| v.is_finite()),
    })
}
