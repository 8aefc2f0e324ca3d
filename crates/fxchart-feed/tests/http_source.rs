//! mockito 서버를 이용한 HTTP 소스 테스트.

use fxchart_core::{SeriesError, Symbol, Timeframe};
use fxchart_feed::{FeedError, HttpOhlcSource, HttpSourceConfig, OhlcDataSource};
use mockito::{Matcher, Server};

fn source_for(base_url: String) -> HttpOhlcSource {
    HttpOhlcSource::new(HttpSourceConfig {
        base_url,
        symbol: Symbol::new("EURUSD"),
        timeframe: Timeframe::H1,
        count: 3,
        timeout_secs: 5,
    })
    .unwrap()
}

fn query_matcher() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("timeframe".into(), "H1".into()),
        Matcher::UrlEncoded("count".into(), "3".into()),
    ])
}

const VALID_BODY: &str = r#"[
    {"time": "2024-05-01 10:00:00", "open": 1.0712, "high": 1.0720, "low": 1.0705, "close": 1.0718, "volume": 1523},
    {"time": "2024-05-01 11:00:00", "open": 1.0718, "high": 1.0731, "low": 1.0711, "close": 1.0729, "volume": 1874},
    {"time": "2024-05-01 12:00:00", "open": 1.0729, "high": 1.0733, "low": 1.0701, "close": 1.0704, "volume": 2011}
]"#;

#[tokio::test]
async fn fetches_and_validates_bars() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ohlc/EURUSD")
        .match_query(query_matcher())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALID_BODY)
        .create_async()
        .await;

    let source = source_for(format!("{}/ohlc", server.url()));
    let series = source.fetch_bars().await.unwrap();

    mock.assert_async().await;
    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![1.0718, 1.0729, 1.0704]);
}

#[tokio::test]
async fn non_success_status_is_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ohlc/EURUSD")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = source_for(format!("{}/ohlc", server.url()))
        .fetch_bars()
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(
        err,
        FeedError::Status {
            code: 503,
            body: "upstream unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ohlc/EURUSD")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "ok"}"#)
        .create_async()
        .await;

    let err = source_for(format!("{}/ohlc", server.url()))
        .fetch_bars()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn invalid_bar_is_series_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ohlc/EURUSD")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"time": "2024-05-01T10:00:00Z", "open": 10, "high": 5, "low": 1, "close": 8, "volume": 0}]"#)
        .create_async()
        .await;

    let err = source_for(format!("{}/ohlc", server.url()))
        .fetch_bars()
        .await
        .unwrap_err();
    assert!(!err.is_transport());
    assert!(matches!(
        err,
        FeedError::Series(SeriesError::InvalidBar { index: 0, .. })
    ));
}

#[tokio::test]
async fn out_of_order_is_not_sorted() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ohlc/EURUSD")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"[
            {"time": "2024-05-01T11:00:00Z", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 0},
            {"time": "2024-05-01T10:00:00Z", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 0}
        ]"#,
        )
        .create_async()
        .await;

    let err = source_for(format!("{}/ohlc", server.url()))
        .fetch_bars()
        .await
        .unwrap_err();
    assert_eq!(err.code(), "OUT_OF_ORDER");
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // 포트 1은 리스닝하지 않음
    let err = source_for("http://127.0.0.1:1/ohlc".to_string())
        .fetch_bars()
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, FeedError::Network(_) | FeedError::Timeout(_)));
}
