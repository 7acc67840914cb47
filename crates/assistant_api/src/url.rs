/// Default base URL for a locally served conversation backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Normalize a base URL for endpoint derivation.
///
/// Empty input falls back to [`DEFAULT_BASE_URL`]; trailing slashes are
/// stripped so derived paths never double up separators.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

/// Endpoint for creating a conversation thread.
pub fn threads_url(base: &str) -> String {
    format!("{}/conversation-threads", normalize_base_url(base))
}

/// Endpoint for posting a user message and opening its event stream.
pub fn messages_url(base: &str, thread_id: &str) -> String {
    format!(
        "{}/conversation-threads/{thread_id}/messages",
        normalize_base_url(base)
    )
}

/// Endpoint for submitting tool-call outputs for a paused run.
pub fn actions_url(base: &str, thread_id: &str) -> String {
    format!(
        "{}/conversation-threads/{thread_id}/actions",
        normalize_base_url(base)
    )
}
