use assistant_api::{
    messages_url, threads_url, ActionRequest, AssistantApiClient, AssistantApiConfig, ToolOutput,
};

fn client() -> AssistantApiClient {
    AssistantApiClient::new(AssistantApiConfig::new("https://chat.example.com/api"))
        .expect("client")
}

#[test]
fn http_message_request_targets_messages_endpoint() {
    let request = client()
        .build_message_request("thread-1", "hello", None)
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        messages_url("https://chat.example.com/api", "thread-1")
    );
    assert_eq!(request.method(), "POST");
}

#[test]
fn http_thread_request_targets_threads_endpoint() {
    let request = client()
        .build_create_thread_request(None)
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        threads_url("https://chat.example.com/api")
    );
    assert_eq!(request.method(), "POST");
}

#[test]
fn http_headers_omit_authorization_without_credential() {
    let headers = client().build_headers(None).expect("headers");

    assert!(headers.get("authorization").is_none());
    assert_eq!(
        headers.get("accept").and_then(|value| value.to_str().ok()),
        Some("text/event-stream")
    );
    assert_eq!(
        headers
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
}

#[test]
fn http_headers_attach_bearer_credential_when_present() {
    let headers = client().build_headers(Some("tok-123")).expect("headers");

    assert_eq!(
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
        Some("Bearer tok-123")
    );
}

#[test]
fn http_extra_headers_are_merged_lowercased() {
    let config = AssistantApiConfig::new("https://chat.example.com/api")
        .insert_header("X-Deployment", "canary");
    let client = AssistantApiClient::new(config).expect("client");

    let headers = client.build_headers(None).expect("headers");
    assert_eq!(
        headers
            .get("x-deployment")
            .and_then(|value| value.to_str().ok()),
        Some("canary")
    );
}

#[test]
fn http_action_request_body_uses_backend_field_names() {
    let request = ActionRequest::new(
        "run-3",
        vec![ToolOutput::new("call-a", "42"), ToolOutput::new("call-b", "ok")],
    );

    let body = serde_json::to_value(&request).expect("serialize action request");
    assert_eq!(body["runId"], "run-3");
    assert_eq!(body["toolCallOutputs"][0]["tool_call_id"], "call-a");
    assert_eq!(body["toolCallOutputs"][0]["output"], "42");
    assert_eq!(body["toolCallOutputs"][1]["tool_call_id"], "call-b");
}
