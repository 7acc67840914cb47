use assistant_api::Annotation;
use palaver::{Role, Transcript};

#[test]
fn transcript_delta_concatenation_matches_arrival_order() {
    let mut transcript = Transcript::new();
    transcript.append(Role::Assistant, "");

    let fragments = ["The ", "answer ", "is ", "42."];
    for fragment in fragments {
        transcript.append_delta(Role::Assistant, fragment);
    }

    assert_eq!(
        transcript.last_of(Role::Assistant).map(|m| m.text.as_str()),
        Some("The answer is 42.")
    );
}

#[test]
fn transcript_deltas_target_their_own_role_across_interleaving() {
    let mut transcript = Transcript::new();
    transcript.append(Role::Assistant, "");
    transcript.append_delta(Role::Assistant, "Running some code.");
    transcript.append(Role::Code, "");
    transcript.append_delta(Role::Code, "print(");
    transcript.append_delta(Role::Assistant, " One moment.");
    transcript.append_delta(Role::Code, "42)");

    let texts: Vec<&str> = transcript
        .messages()
        .iter()
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Running some code. One moment.", "print(42)"]);
}

#[test]
fn transcript_delta_without_open_message_synthesizes_placeholder() {
    let mut transcript = Transcript::new();
    transcript.append(Role::User, "hello");

    transcript.append_delta(Role::Assistant, "orphaned delta");

    assert_eq!(transcript.len(), 2);
    let synthesized = &transcript.messages()[1];
    assert_eq!(synthesized.role, Role::Assistant);
    assert_eq!(synthesized.text, "orphaned delta");
}

#[test]
fn transcript_never_removes_messages() {
    let mut transcript = Transcript::new();
    transcript.append(Role::User, "one");
    transcript.append(Role::Assistant, "two");
    transcript.append_delta(Role::Assistant, " more");
    transcript.rewrite_last(Role::Assistant, &[]);

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages()[0].text, "one");
}

#[test]
fn transcript_sensitive_messages_keep_their_flag() {
    let mut transcript = Transcript::new();
    transcript.append(Role::User, "visible");
    transcript.append_sensitive(Role::User, "password1");

    assert!(!transcript.messages()[0].sensitive);
    assert!(transcript.messages()[1].sensitive);
    assert_eq!(transcript.messages()[1].text, "password1");
}

#[test]
fn transcript_rewrite_applies_to_role_open_message_only() {
    let mut transcript = Transcript::new();
    transcript.append(Role::Assistant, "see [doc]");
    transcript.append(Role::Assistant, "also [doc]");

    transcript.rewrite_last(
        Role::Assistant,
        &[Annotation {
            match_text: "[doc]".to_string(),
            target_file_id: "file-1".to_string(),
        }],
    );

    assert_eq!(transcript.messages()[0].text, "see [doc]");
    assert_eq!(transcript.messages()[1].text, "also /files/file-1");
}
