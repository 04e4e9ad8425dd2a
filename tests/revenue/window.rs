use chrono::NaiveDate;
use httpmock::Method::GET;
use revenue_highlights::revenue::relative_window;
use revenue_highlights::{FmClient, FmError, MonthlyRevenueBuilder, RevenueRequest, YearMonth};

use crate::common::{client_for, fixture, setup_server};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn relative_window_reaches_back_35_days_per_month() {
    let client = FmClient::builder().build().unwrap();

    let req = MonthlyRevenueBuilder::new(&client, "2330")
        .months(12)
        .as_of(ymd(2024, 4, 15))
        .request();

    assert_eq!(req.end, ymd(2024, 4, 15));
    assert_eq!(req.start, ymd(2023, 2, 20));
}

#[tokio::test]
async fn between_sends_explicit_dates() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/data")
            .query_param("start_date", "2023-01-01")
            .query_param("end_date", "2024-03-31");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("month_revenue", "2330", "json"));
    });

    let client = client_for(&server);
    MonthlyRevenueBuilder::new(&client, "2330")
        .between(ymd(2023, 1, 1), ymd(2024, 3, 31))
        .fetch()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn inverted_dates_are_rejected_before_any_request() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v4/data");
        then.status(200).body("{}");
    });

    let client = client_for(&server);
    let err = MonthlyRevenueBuilder::new(&client, "2330")
        .between(ymd(2024, 3, 31), ymd(2023, 1, 1))
        .fetch()
        .await
        .unwrap_err();

    mock.assert_hits(0);
    assert!(matches!(err, FmError::InvalidDates));
}

#[test]
fn year_month_parses_dates_and_months() {
    let full: YearMonth = "2024-03-01".parse().unwrap();
    let short: YearMonth = "2024-03".parse().unwrap();
    assert_eq!(full, short);
    assert_eq!(full.to_string(), "2024-03");
    assert_eq!((full.year(), full.month()), (2024, 3));

    assert!("2024-13".parse::<YearMonth>().is_err());
    assert!("2024-02-30".parse::<YearMonth>().is_err());
    assert!("March".parse::<YearMonth>().is_err());

    let earlier: YearMonth = "2023-12".parse().unwrap();
    assert!(earlier < full);
}

#[test]
fn zero_months_still_requests_one_month() {
    let end = ymd(2024, 4, 15);
    let expected = RevenueRequest {
        start: ymd(2024, 3, 11),
        end,
    };

    assert_eq!(relative_window(end, 0), expected);
    assert_eq!(relative_window(end, 1), expected);

    let client = FmClient::builder().build().unwrap();
    let req = MonthlyRevenueBuilder::new(&client, "2330")
        .months(0)
        .as_of(end)
        .request();
    assert!(req.start < req.end);
}
