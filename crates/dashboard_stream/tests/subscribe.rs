use std::sync::Once;

use dashboard_stream::{FailureKind, ReqwestSubscriber, SubscribeSettings, Subscriber};
use futures_util::StreamExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

#[tokio::test]
async fn connect_streams_event_body() {
    init_logging();
    let server = MockServer::start().await;
    let body = "event: message\ndata: {\"queue_size\": 2}\n\n";
    Mock::given(method("GET"))
        .and(path("/status_stream"))
        .and(header("accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let subscriber = ReqwestSubscriber::new(SubscribeSettings::default());
    let url = format!("{}/status_stream", server.uri());
    let mut stream = subscriber.connect(&url).await.expect("connect ok");

    let mut received = Vec::new();
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.expect("chunk ok"));
    }
    assert_eq!(received, body.as_bytes());
}

#[tokio::test]
async fn connect_fails_on_http_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status_stream"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let subscriber = ReqwestSubscriber::new(SubscribeSettings::default());
    let url = format!("{}/status_stream", server.uri());
    let err = subscriber.connect(&url).await.err().expect("error");
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn connect_rejects_non_event_stream() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status_stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let subscriber = ReqwestSubscriber::new(SubscribeSettings::default());
    let url = format!("{}/status_stream", server.uri());
    let err = subscriber.connect(&url).await.err().expect("error");
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn connect_rejects_invalid_url() {
    init_logging();
    let subscriber = ReqwestSubscriber::new(SubscribeSettings::default());
    let err = subscriber.connect("not a url").await.err().expect("error");
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
