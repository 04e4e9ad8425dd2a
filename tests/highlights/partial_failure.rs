use revenue_highlights::{HistoricalStore, OUTPUT_FILE, RevenueHighlights};

use crate::common::{
    as_of, client_for, envelope, mock_month_revenue, mock_month_revenue_status, setup_server,
};

#[tokio::test]
async fn one_failing_stock_does_not_sink_the_batch() {
    let server = setup_server();
    let a = mock_month_revenue(
        &server,
        "A",
        envelope(
            "A",
            &[("2024-02-01", 100, None, None), ("2024-03-01", 120, Some(60.0), None)],
        ),
    );
    let b = mock_month_revenue_status(&server, "B", 500);
    let c = mock_month_revenue(
        &server,
        "C",
        envelope(
            "C",
            &[("2024-02-01", 300, None, None), ("2024-03-01", 200, Some(-45.0), None)],
        ),
    );

    let mut store = HistoricalStore::new();
    let report = RevenueHighlights::new(client_for(&server))
        .as_of(as_of())
        .get_highlights(["A", "B", "C"], &mut store)
        .await
        .unwrap();

    a.assert();
    b.assert_hits(1);
    c.assert();

    assert_eq!(report.failed, ["B"]);
    let ids: Vec<_> = report.highlights.iter().map(|h| h.stock_id.as_str()).collect();
    assert_eq!(ids, ["A", "C"]);
    assert!(store.get("A").is_some());
    assert!(store.get("B").is_none());
}

#[tokio::test]
async fn fetch_all_still_succeeds_and_omits_failures_from_the_artifact() {
    let server = setup_server();
    let a = mock_month_revenue(
        &server,
        "A",
        envelope(
            "A",
            &[("2024-02-01", 100, None, None), ("2024-03-01", 120, Some(60.0), None)],
        ),
    );
    let b = mock_month_revenue_status(&server, "B", 500);

    let dir = tempfile::tempdir().unwrap();
    let result = RevenueHighlights::new(client_for(&server))
        .as_of(as_of())
        .fetch_all(["A", "B"], dir.path().join("state.json"), dir.path().join("out"))
        .await;

    a.assert();
    b.assert_hits(1);
    assert!(result.success);
    assert_eq!(result.data.as_ref().unwrap().failed, ["B"]);

    let written = std::fs::read_to_string(dir.path().join("out").join(OUTPUT_FILE)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(json["data"].get("failed").is_none());
    assert_eq!(json["data"]["summary"]["total_highlights"], 1);
}
