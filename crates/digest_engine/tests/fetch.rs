use std::sync::Mutex;
use std::time::Duration;

use digest_engine::{
    FailureKind, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher, Stage, StageProgress,
    DEFAULT_USER_AGENT,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<StageProgress>>,
}

impl TestSink {
    fn events(&self) -> Vec<StageProgress> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, progress: StageProgress) {
        self.events.lock().unwrap().push(progress);
    }
}

#[tokio::test]
async fn fetcher_streams_page_and_reports_progress() {
    let server = MockServer::start().await;
    let body = "<html><body>榜单</body></html>";
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();
    let url = format!("{}/top250", server.uri());

    let output = fetcher.fetch(&url, &sink).await.expect("fetch should succeed");

    assert_eq!(output.bytes, body.as_bytes());
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.byte_len, body.len() as u64);
    assert!(output
        .metadata
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("text/html"));

    let events = sink.events();
    assert!(events.iter().all(|event| event.stage == Stage::Fetching));
    assert_eq!(events.first().unwrap().bytes, Some(0));
    assert_eq!(events.last().unwrap().bytes, Some(body.len() as u64));
}

#[tokio::test]
async fn fetcher_sends_the_browser_user_agent() {
    let server = MockServer::start().await;
    // The mock only matches when the configured agent header arrives;
    // otherwise wiremock answers 404 and the fetch fails.
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();
    let url = format!("{}/ua", server.uri());

    let output = fetcher.fetch(&url, &sink).await.expect("fetch should succeed");

    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn redirects_are_followed_and_counted() {
    let server = MockServer::start().await;
    let target = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", target.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>moved</html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();
    let url = format!("{}/old", server.uri());

    let output = fetcher.fetch(&url, &sink).await.expect("fetch should succeed");

    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, target);
    assert_eq!(output.metadata.redirect_count, 1);
}

#[tokio::test]
async fn redirect_limit_stops_the_chain() {
    let server = MockServer::start().await;
    let target = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", target.as_str()))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 1,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let sink = TestSink::default();
    let url = format!("{}/old", server.uri());

    let err = fetcher.fetch(&url, &sink).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn http_error_status_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();
    let url = format!("{}/top250", server.uri());

    let err = fetcher.fetch(&url, &sink).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>late</html>", "text/html")
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let sink = TestSink::default();
    let url = format!("{}/top250", server.uri());

    let err = fetcher.fetch(&url, &sink).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected_by_content_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("hello world", "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let sink = TestSink::default();
    let url = format!("{}/top250", server.uri());

    let err = fetcher.fetch(&url, &sink).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11),
        }
    );
}

#[tokio::test]
async fn unexpected_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top250"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();
    let url = format!("{}/top250", server.uri());

    let err = fetcher.fetch(&url, &sink).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string(),
        }
    );
}

#[tokio::test]
async fn invalid_url_fails_before_any_request() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let sink = TestSink::default();

    let err = fetcher.fetch("not a url", &sink).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert!(sink.events().is_empty());
}
