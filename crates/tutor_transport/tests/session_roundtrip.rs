//! Drives the pure controller with the real transport against a mock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tutor_core::{update, ChatState, Clock, Effect, Msg, Phase, Role, ServiceStatus};
use tutor_transport::{ChatTransport, ClientSettings, ReqwestTransport};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    tutor_logging::initialize_for_tests();
}

/// Applies `msg`, then executes any effects inline the way the app does.
async fn step(transport: &ReqwestTransport, state: ChatState, msg: Msg) -> ChatState {
    let (mut state, effects) = update(state, msg);
    for effect in effects {
        let follow_up = match effect {
            Effect::SendMessage { text } => match transport.send_message(&text).await {
                Ok(reply) => Msg::ReplyReceived {
                    answer: reply.answer,
                    sources: reply.sources,
                },
                Err(err) => Msg::ReplyFailed {
                    reason: err.to_string(),
                },
            },
            Effect::CheckHealth => Msg::HealthChecked(match transport.check_health().await {
                Some(_) => ServiceStatus::Online,
                None => ServiceStatus::Unavailable,
            }),
        };
        state = update(state, follow_up).0;
    }
    state
}

async fn ask(transport: &ReqwestTransport, state: ChatState, text: &str) -> ChatState {
    let state = step(transport, state, Msg::InputChanged(text.to_string())).await;
    step(transport, state, Msg::Submitted).await
}

#[tokio::test]
async fn osmosis_question_gets_answer_with_source() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Osmosis is...",
            "sources": ["NCERT Bio Ch.1"]
        })))
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(ClientSettings::with_base_url(&server.uri()).unwrap()).unwrap();

    let state = ChatState::with_clock(Clock::fixed("9:00:00 AM"));
    let state = ask(&transport, state, "What is osmosis?").await;

    let view = state.view();
    assert_eq!(view.message_count, 3);
    assert_eq!(view.messages[1].role, Role::User);
    assert_eq!(view.messages[1].content, "What is osmosis?");
    assert_eq!(view.messages[2].content, "Osmosis is...");
    assert_eq!(view.messages[2].sources, vec!["NCERT Bio Ch.1".to_string()]);
    assert!(!view.messages[2].is_error);
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn timeout_becomes_error_message_and_unblocks_session() {
    init_logging();
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
    let mut settings = ClientSettings::with_base_url(&server.uri()).unwrap();
    settings.chat_timeout = Duration::from_millis(50);
    let transport = ReqwestTransport::new(settings).unwrap();

    let state = ask(&transport, ChatState::new(), "slow question").await;

    let transcript = state.transcript();
    assert_eq!(transcript.len(), 3);
    assert!(transcript[2].is_error());
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn health_failure_leaves_transcript_alone() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let transport =
        ReqwestTransport::new(ClientSettings::with_base_url(&server.uri()).unwrap()).unwrap();

    let state = ChatState::new();
    let before = state.transcript().to_vec();
    let state = step(&transport, state, Msg::HealthPollDue).await;
    let state = step(&transport, state, Msg::HealthPollDue).await;

    assert_eq!(state.service(), ServiceStatus::Unavailable);
    assert_eq!(state.transcript(), before.as_slice());
}
