use assistant_api::{actions_url, messages_url, normalize_base_url, threads_url};

#[test]
fn url_normalization_strips_trailing_slashes() {
    assert_eq!(
        normalize_base_url("https://chat.example.com/api/"),
        "https://chat.example.com/api"
    );
}

#[test]
fn url_normalization_falls_back_to_default_for_empty_input() {
    assert_eq!(normalize_base_url(""), assistant_api::url::DEFAULT_BASE_URL);
    assert_eq!(
        normalize_base_url("   "),
        assistant_api::url::DEFAULT_BASE_URL
    );
}

#[test]
fn url_threads_endpoint_is_derived_from_base() {
    assert_eq!(
        threads_url("https://chat.example.com/api"),
        "https://chat.example.com/api/conversation-threads"
    );
}

#[test]
fn url_messages_endpoint_embeds_thread_id() {
    assert_eq!(
        messages_url("https://chat.example.com/api/", "thread-9"),
        "https://chat.example.com/api/conversation-threads/thread-9/messages"
    );
}

#[test]
fn url_actions_endpoint_embeds_thread_id() {
    assert_eq!(
        actions_url("https://chat.example.com/api", "thread-9"),
        "https://chat.example.com/api/conversation-threads/thread-9/actions"
    );
}
