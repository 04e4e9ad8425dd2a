#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use httpmock::{Method::GET, Mock, MockServer};
use revenue_highlights::{FmClient, MonthlyRevenueRecord, YearMonth};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::{fs, path::Path};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, stock_id: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, stock_id, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn client_for(server: &MockServer) -> FmClient {
    FmClient::builder()
        .base_url(Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

pub fn client_with_token(server: &MockServer, token: &str) -> FmClient {
    FmClient::builder()
        .base_url(Url::parse(&server.base_url()).unwrap())
        .api_token(token)
        .build()
        .unwrap()
}

/// Fixed "now" used by batch tests: 2024-04-15 09:00 Asia/Taipei.
pub fn as_of() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-04-15T09:00:00+08:00").unwrap()
}

/// A FinMind success envelope; each row is `(date, revenue, yoy, mom)`.
pub fn envelope(stock_id: &str, rows: &[(&str, i64, Option<f64>, Option<f64>)]) -> String {
    let data: Vec<Value> = rows
        .iter()
        .map(|(date, revenue, yoy, mom)| {
            json!({
                "date": date,
                "stock_id": stock_id,
                "country": "Taiwan",
                "revenue": revenue,
                "revenue_year_growth_rate": yoy,
                "revenue_month_growth_rate": mom,
            })
        })
        .collect();
    json!({ "msg": "success", "status": 200, "data": data }).to_string()
}

pub fn mock_month_revenue<'a>(server: &'a MockServer, stock_id: &str, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/data")
            .query_param("dataset", "TaiwanStockMonthRevenue")
            .query_param("data_id", stock_id);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_month_revenue_status<'a>(server: &'a MockServer, stock_id: &str, status: u16) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/data")
            .query_param("data_id", stock_id);
        then.status(status).body("upstream unavailable");
    })
}

pub fn month(s: &str) -> YearMonth {
    s.parse().unwrap()
}

pub fn rec(stock_id: &str, m: &str, revenue: i64, yoy: Option<f64>) -> MonthlyRevenueRecord {
    MonthlyRevenueRecord {
        stock_id: stock_id.to_string(),
        report_month: month(m),
        revenue: Decimal::from(revenue),
        yoy_pct: yoy,
        mom_pct: None,
    }
}

/// `FM_LIVE=1` or `FM_RECORD=1`: ignored tests may reach the real FinMind API.
pub fn live_or_record_enabled() -> bool {
    is_recording() || std::env::var("FM_LIVE").ok().as_deref() == Some("1")
}

pub fn is_recording() -> bool {
    std::env::var("FM_RECORD").ok().as_deref() == Some("1")
}
