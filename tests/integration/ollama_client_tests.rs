//! Ollama client tests against a mock HTTP server

#[cfg(test)]
mod tests {
    use crate::common::{chunk_line, done_line};
    use crate::{assert_err, assert_ok};
    use llmbot::BotError;
    use llmbot::core::health::HealthMonitorConfig;
    use llmbot::core::ollama::{ChatMessage, ChatRequest};
    use llmbot::core::streaming::{ChatBackend, StreamingConfig};
    use llmbot::core::{
        AvailabilityMonitor, AvailabilityProbe, ContentFilter, OllamaClient, ResponseSource,
        StreamingReader,
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> Arc<OllamaClient> {
        Arc::new(OllamaClient::new(server.uri(), Duration::from_secs(2)).unwrap())
    }

    fn request() -> ChatRequest {
        ChatRequest::new(
            "bean_chat",
            vec![ChatMessage::system("be brief"), ChatMessage::user("hello")],
        )
    }

    fn reader(client: Arc<OllamaClient>, config: StreamingConfig) -> StreamingReader {
        StreamingReader::new(client, config, Arc::new(ContentFilter::disabled()))
    }

    fn ndjson(lines: &[String]) -> String {
        lines.join("\n") + "\n"
    }

    #[tokio::test]
    async fn test_streamed_chat() {
        let server = MockServer::start().await;
        let body = ndjson(&[chunk_line("Hello"), chunk_line(", world"), done_line()]);
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "model": "bean_chat", "stream": true })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = assert_ok!(
            reader(client(&server), StreamingConfig::default())
                .generate(&request())
                .await
        );

        assert_eq!(outcome.text, "Hello, world");
        assert_eq!(outcome.source, ResponseSource::Stream);
    }

    #[tokio::test]
    async fn test_non_streaming_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "bean_chat",
                "message": { "role": "assistant", "content": "Hi!" },
                "done": true
            })))
            .mount(&server)
            .await;

        let text = assert_ok!(
            client(&server)
                .complete(&request().with_stream(false), Duration::from_secs(5))
                .await
        );
        assert_eq!(text, "Hi!");
    }

    #[tokio::test]
    async fn test_slow_stream_open_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "stream": true })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(ndjson(&[chunk_line("too late"), done_line()]), "application/x-ndjson")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "from fallback" },
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = StreamingConfig {
            request_timeout: Duration::from_millis(300),
            line_timeout: Duration::from_millis(300),
            fallback_timeout: Duration::from_secs(5),
        };
        let outcome = assert_ok!(reader(client(&server), config).generate(&request()).await);

        assert_eq!(outcome.text, "from fallback");
        assert_eq!(outcome.source, ResponseSource::Fallback);
    }

    #[tokio::test]
    async fn test_upstream_error_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
            .mount(&server)
            .await;

        let result = client(&server)
            .open_stream(&request().with_stream(true), Duration::from_secs(5))
            .await;
        let Err(err) = result else {
            panic!("Expected the stream to be refused");
        };

        match &err {
            BotError::Upstream { status, message } => {
                assert_eq!(*status, 500);
                assert!(message.chars().count() <= 200);
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_probe_marks_server_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{ "name": "bean_chat" }, { "name": "qwen-coder" }]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        assert_ok!(client.probe().await);

        let monitor = AvailabilityMonitor::new(client, HealthMonitorConfig::default());
        assert!(!monitor.is_available());
        monitor.check_now().await;
        assert!(monitor.is_available());
    }

    #[tokio::test]
    async fn test_probe_rejects_unexpected_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        assert!(client(&server).probe().await.is_err());
    }

    #[tokio::test]
    async fn test_probe_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = assert_err!(client(&server).probe().await);
        assert!(matches!(err, BotError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let err = assert_err!(client.probe().await);
        assert!(err.is_transient());
    }
}
