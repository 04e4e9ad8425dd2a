use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use revenue_highlights::{
    FmError, HistoricalStore, MonthlyRevenueRecord, RevenueHighlights, RevenueRequest,
    RevenueService, StockNames,
};

use crate::common::{as_of, rec};

#[derive(Default)]
struct StubService {
    series: HashMap<String, Vec<MonthlyRevenueRecord>>,
    requests: Arc<Mutex<Vec<(String, RevenueRequest)>>>,
    credentials: bool,
}

impl StubService {
    fn with(mut self, stock_id: &str, series: Vec<MonthlyRevenueRecord>) -> Self {
        self.series.insert(stock_id.to_string(), series);
        self
    }
}

impl RevenueService for StubService {
    fn fetch_month_revenue<'a>(
        &'a self,
        stock_id: &'a str,
        req: RevenueRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<MonthlyRevenueRecord>, FmError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap()
                .push((stock_id.to_string(), req));
            self.series
                .get(stock_id)
                .cloned()
                .ok_or_else(|| FmError::Data(format!("no stub for {stock_id}")))
        })
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }
}

#[tokio::test]
async fn aggregator_runs_against_any_revenue_service() {
    let service = StubService::default()
        .with(
            "1101",
            vec![rec("1101", "2024-02", 100, None), rec("1101", "2024-03", 95, Some(31.0))],
        )
        .with(
            "2412",
            vec![rec("2412", "2024-02", 10, None), rec("2412", "2024-03", 12, Some(3.0))],
        );

    let mut store = HistoricalStore::new();
    let runner = RevenueHighlights::new(service)
        .as_of(as_of())
        .months(12)
        .names(StockNames::empty());
    let report = runner
        .get_highlights(["1101", "2412", "0000"], &mut store)
        .await
        .unwrap();

    let ids: Vec<_> = report.highlights.iter().map(|h| h.stock_id.as_str()).collect();
    assert_eq!(ids, ["2412", "1101"]);
    assert_eq!(report.highlights[1].display_name, "1101");
    assert_eq!(report.failed, ["0000"]);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn every_stock_shares_one_request_window() {
    let service = StubService::default();
    let requests = Arc::clone(&service.requests);
    let runner = RevenueHighlights::new(service).as_of(as_of()).months(12);

    let mut store = HistoricalStore::new();
    let report = runner
        .get_highlights(vec!["A".to_string(), "B".to_string()], &mut store)
        .await
        .unwrap();

    let expected = RevenueRequest {
        start: NaiveDate::from_ymd_opt(2023, 2, 20).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
    };
    assert_eq!(runner.request(), expected);
    assert_eq!(
        *requests.lock().unwrap(),
        [("A".to_string(), expected), ("B".to_string(), expected)]
    );
    assert_eq!(report.failed, ["A", "B"]);
}

#[tokio::test]
async fn required_credentials_short_circuit_the_batch() {
    let service = StubService::default().with("1101", vec![rec("1101", "2024-03", 1, None)]);

    let mut store = HistoricalStore::new();
    let err = RevenueHighlights::new(service)
        .require_credentials(true)
        .get_highlights(["1101"], &mut store)
        .await
        .unwrap_err();

    assert!(matches!(err, FmError::MissingCredentials(_)));
}
