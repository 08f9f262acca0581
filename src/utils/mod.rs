//! Utility functions and helpers.

pub mod console;
pub mod date;
pub mod http;

/// Extract the 32-hex page id from a Notion page reference.
///
/// Accepts a bare id (with or without dashes) or a page URL such as
/// `https://www.notion.so/Workspace/CS-124-25a399d357138052ab2be817336f99b7`.
/// Anything else is returned trimmed and unchanged.
pub fn page_id_from_ref(reference: &str) -> String {
    let reference = reference.trim();
    let last_segment = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference)
        .rsplit('/')
        .next()
        .unwrap_or(reference);

    let hex: String = last_segment
        .chars()
        .rev()
        .filter(|c| *c != '-')
        .take_while(|c| c.is_ascii_hexdigit())
        .take(32)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if hex.len() == 32 {
        hex.to_ascii_lowercase()
    } else {
        reference.to_string()
    }
}
