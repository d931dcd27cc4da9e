//! HTTP transcript source against a mock transcript service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transcript_client::{ClientError, HttpTranscriptSource, TranscriptSource};
use transcript_types::SourceConfig;

fn source(server: &MockServer) -> HttpTranscriptSource {
    HttpTranscriptSource::new(&SourceConfig {
        endpoint: server.uri(),
        timeout_secs: 2,
        transcript_dir: None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transcript/9Edkw-PC_jI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"text": "welcome back", "begin": "00:00:00.000", "end": "00:00:02.000"},
            {"text": "today we talk about rust", "begin": "00:00:02.000", "end": "00:00:05.500"},
            {"text": null, "begin": "00:00:05.500", "end": "00:00:06.000"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let transcript = source(&server).fetch("9Edkw-PC_jI").await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.entries()[1].text, "today we talk about rust");
    assert_eq!(transcript.entries()[1].end, Duration::from_millis(5_500));
    assert_eq!(transcript.entries()[2].text, "");
}

#[tokio::test]
async fn test_fetch_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transcript/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no subtitles"))
        .mount(&server)
        .await;

    let err = source(&server).fetch("missing").await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no subtitles");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transcript/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source(&server).fetch("broken").await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_empty_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transcript/silent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = source(&server).fetch("silent").await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyTranscript(id) if id == "silent"));
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transcript/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let source = HttpTranscriptSource::new(&SourceConfig {
        endpoint: server.uri(),
        timeout_secs: 1,
        transcript_dir: None,
    })
    .unwrap();
    let err = source.fetch("slow").await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout));
}
