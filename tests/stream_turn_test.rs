//! Integration tests for a full streaming chat turn against a mock
//! backend: SSE body framing, event handling, card lookups, and the
//! failure paths around them.

use card_oracle::chat::{run_turn, ChatSession, Phase, Role};
use card_oracle::oracle::{OracleClient, OracleError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARD_ID: &str = "56ebc372-aabd-4174-a943-c7bf59e5028d";

fn card_body(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "type_line": "Legendary Creature — Human Wizard",
        "cmc": 3.0,
        "color_identity": ["U", "R"],
    })
}

async fn mount_stream(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/search/stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_raw(body.to_string(), "text/event-stream"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_turn_with_chunks_card_and_done() {
    let server = MockServer::start().await;

    let sse_body = format!(
        "data: {{\"type\": \"chunk\", \"content\": \"Niv-Mizzet \"}}\n\n\
         data: {{\"type\": \"chunk\", \"content\": \"draws you cards.\"}}\n\n\
         data: {{\"type\": \"seeking_card\", \"content\": \"Looking up Niv-Mizzet\"}}\n\n\
         data: {{\"type\": \"found_card\", \"id\": \"{}\"}}\n\n\
         data: {{\"type\": \"done\"}}\n\n",
        CARD_ID
    );
    mount_stream(&server, &sse_body).await;

    Mock::given(method("GET"))
        .and(path(format!("/cards/{}", CARD_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_body(CARD_ID, "Niv-Mizzet")))
        .mount(&server)
        .await;

    let client = OracleClient::with_base_url(server.uri());
    let mut session = ChatSession::new();
    let query = session.begin_turn("tell me about niv-mizzet").unwrap();

    let stream = client.stream_search(&query).await.unwrap();
    run_turn(&mut session, stream, &client).await;

    assert_eq!(session.phase(), Phase::Terminated);
    assert!(session.error().is_none());

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "tell me about niv-mizzet");

    let reply = &messages[1];
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "Niv-Mizzet draws you cards.");
    assert_eq!(reply.cards.len(), 1);
    assert_eq!(reply.cards[0].name, "Niv-Mizzet");
    assert!(!reply.is_seeking());
}

#[tokio::test]
async fn test_stream_ending_without_done_salvages_and_reports() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        "data: {\"type\": \"chunk\", \"content\": \"partial answer\"}\n\n",
    )
    .await;

    let client = OracleClient::with_base_url(server.uri());
    let mut session = ChatSession::new();
    let query = session.begin_turn("hello").unwrap();

    let stream = client.stream_search(&query).await.unwrap();
    run_turn(&mut session, stream, &client).await;

    assert_eq!(session.phase(), Phase::Terminated);
    assert_eq!(
        session.error(),
        Some("Stream ended before a done event was received.")
    );
    assert_eq!(session.messages()[1].content, "partial answer");
}

#[tokio::test]
async fn test_card_lookup_failure_becomes_inline_notice() {
    let server = MockServer::start().await;

    let sse_body = format!(
        "data: {{\"type\": \"chunk\", \"content\": \"Here it is.\"}}\n\n\
         data: {{\"type\": \"found_card\", \"id\": \"{}\"}}\n\n\
         data: {{\"type\": \"done\"}}\n\n",
        CARD_ID
    );
    mount_stream(&server, &sse_body).await;

    Mock::given(method("GET"))
        .and(path(format!("/cards/{}", CARD_ID)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = OracleClient::with_base_url(server.uri());
    let mut session = ChatSession::new();
    let query = session.begin_turn("find a card").unwrap();

    let stream = client.stream_search(&query).await.unwrap();
    run_turn(&mut session, stream, &client).await;

    assert_eq!(session.phase(), Phase::Terminated);
    assert!(session.error().is_none());

    let reply = &session.messages()[1];
    assert!(reply.cards.is_empty());
    assert!(reply.content.starts_with("Here it is."));
    assert!(reply.content.contains("Card lookup failed with 404"));
}

#[tokio::test]
async fn test_server_error_status_fails_before_streaming() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/stream"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = OracleClient::with_base_url(server.uri());
    let result = client.stream_search("boom").await;

    match result {
        Err(OracleError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected ServerError, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_query_is_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/stream"))
        .and(query_param("query", "what does lightning bolt do?"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: {\"type\": \"done\"}\n\n", "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = OracleClient::with_base_url(server.uri());
    let mut session = ChatSession::new();
    let query = session
        .begin_turn("  what does lightning bolt do?  ")
        .unwrap();

    let stream = client.stream_search(&query).await.unwrap();
    run_turn(&mut session, stream, &client).await;

    assert_eq!(session.phase(), Phase::Terminated);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_unparseable_payload_appends_literal_text() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        "data: plain words from the server\n\ndata: {\"type\": \"done\"}\n\n",
    )
    .await;

    let client = OracleClient::with_base_url(server.uri());
    let mut session = ChatSession::new();
    let query = session.begin_turn("hi").unwrap();

    let stream = client.stream_search(&query).await.unwrap();
    run_turn(&mut session, stream, &client).await;

    assert_eq!(session.messages()[1].content, "plain words from the server");
    assert!(session.error().is_none());
}
