//! Detects whether a message addresses the bot and extracts the prompt.

/// Outcome of running mention detection over a message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    /// The bot's handle does not appear in the text.
    NotAddressed,
    /// The handle appears but nothing is left once it is stripped.
    EmptyPrompt,
    /// The residual prompt after stripping the handle and trimming.
    Prompt(String),
}

/// Runs case-insensitive substring matching of `handle` against `text`.
///
/// This is deliberately not a strict mention protocol: any substring
/// occurrence counts, with no word-boundary checks. Matching is ASCII
/// case-insensitive, which covers Telegram usernames (`a-z`, `0-9`, `_`).
/// `handle` is expected to be lowercased and `@`-prefixed.
pub fn detect(text: &str, handle: &str) -> Mention {
    if find_ignore_ascii_case(text, handle).is_none() {
        return Mention::NotAddressed;
    }
    let stripped = strip_handle(text, handle);
    let prompt = stripped.trim();
    if prompt.is_empty() {
        Mention::EmptyPrompt
    } else {
        Mention::Prompt(prompt.to_string())
    }
}

/// Removes every occurrence of `handle` from `text`, ignoring ASCII case.
fn strip_handle(text: &str, handle: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = find_ignore_ascii_case(rest, handle) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + handle.len()..];
    }
    out.push_str(rest);
    out
}

// Byte-window scan is safe here: the handle is pure ASCII, so a matching
// window can only start and end on char boundaries.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
