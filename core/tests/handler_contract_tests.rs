//! ChatProxyHandler contract tests
//!
//! Exercises validation order, context selection and the normalisation
//! policy without live network calls.

use http::Method;
use supportdesk_core::llm::adapters::transport::{CallLog, FakeReply, FakeTransport};
use supportdesk_core::llm::contracts::{EMPTY_OR_BLOCKED_TEXT, UPSTREAM_UNAVAILABLE_TEXT};
use supportdesk_core::{
    ApiKey, ChatProxyHandler, ChatRequestBody, FallbackReason, IncomingRequest,
    NormalizedResponse, ProxyConfig, ProxyError,
};

const GOOD_REPLY: &str = r#"{"candidates":[{"content":{"parts":[{"text":"Los pagos se retienen en **Escrow**."}],"role":"model"},"finishReason":"STOP"}],"modelVersion":"gemini-1.5-flash"}"#;

fn config_with_key(key: Option<&str>) -> ProxyConfig {
    ProxyConfig {
        api_key: key.and_then(ApiKey::new),
        ..ProxyConfig::default()
    }
}

fn handler_with(reply: FakeReply, key: Option<&str>) -> (ChatProxyHandler, CallLog) {
    let fake = FakeTransport::with_reply(reply);
    let log = fake.call_log();
    let handler = ChatProxyHandler::from_config_with_transport(&config_with_key(key), fake.into());
    (handler, log)
}

fn calls(log: &CallLog) -> usize {
    log.lock().unwrap().len()
}

fn sent_system_instruction(log: &CallLog) -> String {
    let calls = log.lock().unwrap();
    calls.last().unwrap().json()["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_non_post_methods_are_rejected_without_upstream_call() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
        let request = IncomingRequest::from_parts(method, br#"{"query":"hola"}"#);
        let err = handler.handle(request).await.unwrap_err();
        assert_eq!(err, ProxyError::MethodNotAllowed);
    }
    assert_eq!(calls(&log), 0);
}

#[tokio::test]
async fn test_method_check_precedes_query_check() {
    let (handler, _log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), None);
    let request = IncomingRequest::from_parts(Method::GET, b"");
    assert_eq!(
        handler.handle(request).await.unwrap_err(),
        ProxyError::MethodNotAllowed
    );
}

#[tokio::test]
async fn test_missing_or_empty_query_is_bad_request() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));

    for body in [
        &b""[..],
        &b"{}"[..],
        &br#"{"query":""}"#[..],
        &br#"{"context":"jobs"}"#[..],
        &b"not json"[..],
    ] {
        let err = handler
            .handle(IncomingRequest::from_parts(Method::POST, body))
            .await
            .unwrap_err();
        assert_eq!(err, ProxyError::MissingQuery);
    }
    assert_eq!(calls(&log), 0);
}

#[tokio::test]
async fn test_whitespace_query_is_forwarded() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));
    let response = handler
        .handle(IncomingRequest::from_parts(Method::POST, br#"{"query":"   "}"#))
        .await
        .unwrap();

    assert!(!response.is_fallback());
    let calls = log.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].json()["contents"][0]["parts"][0]["text"], "   ");
}

#[tokio::test]
async fn test_query_check_precedes_credential_check() {
    let (handler, _log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), None);
    let err = handler
        .handle(IncomingRequest::from_parts(Method::POST, b"{}"))
        .await
        .unwrap_err();
    assert_eq!(err, ProxyError::MissingQuery);
}

#[tokio::test]
async fn test_missing_credential_is_server_misconfigured() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), None);
    assert!(!handler.has_api_key());

    for query in ["hola", "¿Cómo funciona el Escrow?", "x"] {
        let err = handler
            .handle(IncomingRequest::post(query, Some("jobs")))
            .await
            .unwrap_err();
        assert_eq!(err, ProxyError::MissingApiKey);
        assert_eq!(err.status().as_u16(), 500);
    }
    assert_eq!(calls(&log), 0);
}

// =============================================================================
// Context selection
// =============================================================================

#[tokio::test]
async fn test_jobs_context_uses_urbanfix_knowledge() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));
    handler
        .handle(IncomingRequest::post("¿Cómo pago?", Some("jobs")))
        .await
        .unwrap();

    let instruction = sent_system_instruction(&log);
    assert!(instruction.contains("UrbanFix"));
    assert!(instruction.contains("Escrow"));
    assert!(!instruction.contains("ReporFlow"));
}

#[tokio::test]
async fn test_other_contexts_default_to_reporflow() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));

    for context in [None, Some("reporflow"), Some("unknown"), Some("Jobs"), Some("")] {
        handler
            .handle(IncomingRequest::post("¿Cómo exporto a Excel?", context))
            .await
            .unwrap();

        let instruction = sent_system_instruction(&log);
        assert!(instruction.contains("ReporFlow"), "context {:?}", context);
        assert!(instruction.contains("nómina"), "context {:?}", context);
        assert!(!instruction.contains("UrbanFix"), "context {:?}", context);
    }
}

#[tokio::test]
async fn test_query_is_forwarded_verbatim_with_generation_config() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));
    let query = "  <b>¿Puedo</b> \"publicar\" gratis?\n";
    handler
        .handle(IncomingRequest::post(query, Some("jobs")))
        .await
        .unwrap();

    let calls = log.lock().unwrap();
    let sent = calls[0].json();
    assert_eq!(sent["contents"][0]["role"], "user");
    assert_eq!(sent["contents"][0]["parts"][0]["text"], query);
    assert_eq!(sent["generationConfig"]["maxOutputTokens"], 500);
    assert_eq!(calls[0].query, vec![("key".to_string(), "key".to_string())]);
    assert!(calls[0]
        .url
        .ends_with("/models/gemini-1.5-flash:generateContent"));
}

// =============================================================================
// Normalisation
// =============================================================================

#[tokio::test]
async fn test_successful_reply_passes_through_unmodified() {
    let (handler, _log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));
    let response = handler
        .handle(IncomingRequest::post("hola", None))
        .await
        .unwrap();

    assert!(!response.is_fallback());
    assert_eq!(response.text(), "Los pagos se retienen en **Escrow**.");
    assert_eq!(response.into_body(), GOOD_REPLY);
}

#[tokio::test]
async fn test_whitespace_reply_text_passes_through_unmodified() {
    let raw = r#"{"candidates":[{"content":{"parts":[{"text":" "}]}}]}"#;
    let (handler, _log) = handler_with(FakeReply::Body(raw.to_string()), Some("key"));
    let response = handler
        .handle(IncomingRequest::post("hola", None))
        .await
        .unwrap();

    assert!(!response.is_fallback());
    assert_eq!(response.text(), " ");
    assert_eq!(response.into_body(), raw);
}

#[tokio::test]
async fn test_upstream_failures_become_unavailable_fallback() {
    let replies = [
        FakeReply::NetworkError("connection refused".to_string()),
        FakeReply::Timeout(20_000),
        FakeReply::Status {
            status: 500,
            body: r#"{"error":{"code":500,"message":"internal"}}"#.to_string(),
        },
        FakeReply::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        },
        FakeReply::Body("<html>bad gateway</html>".to_string()),
    ];

    for reply in replies {
        let (handler, _log) = handler_with(reply.clone(), Some("key"));
        let response = handler
            .handle(IncomingRequest::post("hola", Some("jobs")))
            .await
            .unwrap();

        assert_eq!(
            response,
            NormalizedResponse::Fallback(FallbackReason::UpstreamUnavailable),
            "reply {:?}",
            reply
        );
        let body = response.into_body();
        assert!(body.contains(UPSTREAM_UNAVAILABLE_TEXT));
        assert!(!body.contains("connection refused"));
        assert!(!body.contains("quota exceeded"));
    }
}

#[tokio::test]
async fn test_empty_or_blocked_reply_becomes_apology() {
    let payloads = [
        r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
        r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#,
        r#"{"candidates":[]}"#,
    ];

    for payload in payloads {
        let (handler, _log) = handler_with(FakeReply::Body(payload.to_string()), Some("key"));
        let response = handler
            .handle(IncomingRequest::post("hola", None))
            .await
            .unwrap();

        assert_eq!(
            response,
            NormalizedResponse::Fallback(FallbackReason::EmptyOrBlocked)
        );
        let body: serde_json::Value = serde_json::from_str(&response.into_body()).unwrap();
        assert_eq!(
            body["candidates"][0]["content"]["parts"][0]["text"],
            EMPTY_OR_BLOCKED_TEXT
        );
        assert!(body.get("promptFeedback").is_none());
    }
}

#[tokio::test]
async fn test_repeated_requests_each_call_upstream() {
    let (handler, log) = handler_with(FakeReply::Body(GOOD_REPLY.to_string()), Some("key"));
    let request = IncomingRequest::new(
        Method::POST,
        ChatRequestBody {
            query: Some("hola".to_string()),
            context: Some("jobs".to_string()),
        },
    );

    let first = handler.handle(request.clone()).await.unwrap();
    let second = handler.handle(request).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls(&log), 2);
}
