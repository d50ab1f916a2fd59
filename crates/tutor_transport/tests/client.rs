use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tutor_transport::{
    ChatReply, ChatTransport, ClientSettings, FailureKind, HealthReport, ReqwestTransport,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    let settings = ClientSettings::with_base_url(&server.uri()).expect("base url");
    ReqwestTransport::new(settings).expect("client")
}

/// A base URL nothing listens on.
fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn send_message_posts_json_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "What is osmosis?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Osmosis is...",
            "sources": ["NCERT Bio Ch.1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .send_message("What is osmosis?")
        .await
        .expect("reply");

    assert_eq!(
        reply,
        ChatReply {
            answer: "Osmosis is...".to_string(),
            sources: vec!["NCERT Bio Ch.1".to_string()],
        }
    );
}

#[tokio::test]
async fn missing_sources_become_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "x" })))
        .mount(&server)
        .await;

    let reply = transport_for(&server).send_message("q").await.expect("reply");
    assert_eq!(reply.answer, "x");
    assert_eq!(reply.sources, Vec::<String>::new());
}

#[tokio::test]
async fn server_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let err = transport_for(&server).send_message("q").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server).send_message("q").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn body_without_answer_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sources": [] })))
        .mount(&server)
        .await;

    let err = transport_for(&server).send_message("q").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn slow_reply_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "answer": "late" })),
        )
        .mount(&server)
        .await;

    let mut settings = ClientSettings::with_base_url(&server.uri()).expect("base url");
    settings.chat_timeout = Duration::from_millis(50);
    let transport = ReqwestTransport::new(settings).expect("client");

    let err = transport.send_message("q").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let settings = ClientSettings::with_base_url(&dead_base_url()).expect("base url");
    let transport = ReqwestTransport::new(settings).expect("client");

    let err = transport.send_message("q").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn health_returns_opaque_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    let report = transport_for(&server).check_health().await;
    assert_eq!(report, Some(HealthReport(json!({ "status": "healthy" }))));
}

#[tokio::test]
async fn health_failures_collapse_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    assert_eq!(transport_for(&server).check_health().await, None);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    assert_eq!(transport_for(&server).check_health().await, None);
}

#[tokio::test]
async fn health_against_dead_service_is_repeatable() {
    let settings = ClientSettings::with_base_url(&dead_base_url()).expect("base url");
    let transport = ReqwestTransport::new(settings).expect("client");

    let first = transport.check_health().await;
    let second = transport.check_health().await;
    assert_eq!(first, None);
    assert_eq!(second, None);
}
