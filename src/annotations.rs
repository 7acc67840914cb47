//! Rewrites in-text citation markers into retrievable reference paths.

use assistant_api::Annotation;

/// Stable reference path for a backend-hosted file.
pub fn file_reference_path(file_id: &str) -> String {
    format!("/files/{file_id}")
}

/// Inline image markup for a streamed image reference.
pub fn image_markup(file_id: &str) -> String {
    format!("\n![{file_id}]({})\n", file_reference_path(file_id))
}

/// Replace every literal occurrence of each annotation's placeholder with
/// the reference path derived from its file id.
///
/// Reapplying the same annotations is a no-op: the rewritten form no longer
/// matches the placeholder text.
pub fn rewrite(text: &str, annotations: &[Annotation]) -> String {
    let mut rewritten = text.to_string();

    for annotation in annotations {
        if annotation.match_text.is_empty() {
            continue;
        }
        rewritten = rewritten.replace(
            &annotation.match_text,
            &file_reference_path(&annotation.target_file_id),
        );
    }

    rewritten
}
