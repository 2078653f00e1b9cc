//! Renders Telegram messages into one-line history snippets.

use teloxide::types::{Message, User};

use crate::history::HistoryLine;
use crate::identity::BotIdentity;

const TRUNCATION_MARKER: char = '…';

/// Converts a Telegram message into a single-line snippet tagged with its
/// author, ready to append to the history store.
///
/// The text source is the message text, else its caption, else a
/// `[<content-kind> message]` placeholder; media is never fetched.
pub fn format_line(
    msg: &Message,
    identity: &BotIdentity,
    from_bot: bool,
    max_len: usize,
) -> HistoryLine {
    let raw = match msg.text().or_else(|| msg.caption()) {
        Some(text) => text.to_string(),
        None => format!("[{} message]", content_kind(msg)),
    };
    let text = sanitize(&raw, max_len);
    let line = if from_bot {
        format!("> {} (you): {text}", identity.display_name)
    } else {
        match msg.from.as_ref() {
            Some(user) => format!("> {}: {text}", format_user(user)),
            None => format!("> unknown: {text}"),
        }
    };
    HistoryLine::new(from_bot, line)
}

/// Collapses newlines to spaces and truncates to `max_len` chars, appending
/// an ellipsis when cut. Counts chars, not bytes.
pub fn sanitize(raw: &str, max_len: usize) -> String {
    let text = raw.replace('\n', " ");
    if text.chars().count() <= max_len {
        return text;
    }
    let mut clipped: String = text.chars().take(max_len.saturating_sub(1)).collect();
    clipped.push(TRUNCATION_MARKER);
    clipped
}

/// Builds a human-readable user label like `"Alice Jones (@alice)"`.
///
/// Falls back to just the name when the user has no public username.
pub fn format_user(user: &User) -> String {
    let name: String = std::iter::once(user.first_name.as_str())
        .chain(user.last_name.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    match user.username.as_deref() {
        Some(handle) => format!("{name} (@{handle})"),
        None => name,
    }
}

fn content_kind(msg: &Message) -> &'static str {
    if msg.photo().is_some() {
        "photo"
    } else if msg.sticker().is_some() {
        "sticker"
    } else if msg.document().is_some() {
        "document"
    } else if msg.video().is_some() {
        "video"
    } else if msg.voice().is_some() {
        "voice"
    } else if msg.audio().is_some() {
        "audio"
    } else if msg.animation().is_some() {
        "animation"
    } else if msg.video_note().is_some() {
        "video note"
    } else if msg.location().is_some() {
        "location"
    } else if msg.contact().is_some() {
        "contact"
    } else if msg.poll().is_some() {
        "poll"
    } else {
        "unsupported"
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::UserId;

    use super::*;

    fn user(first: &str, last: Option<&str>, username: Option<&str>) -> User {
        User {
            id: UserId(42),
            is_bot: false,
            first_name: first.to_string(),
            last_name: last.map(ToString::to_string),
            username: username.map(ToString::to_string),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(sanitize("hello there", 160), "hello there");
    }

    #[test]
    fn newlines_become_spaces() {
        let out = sanitize("line one\nline two\nline three", 160);
        assert_eq!(out, "line one line two line three");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn long_text_is_clipped_to_max_len_with_marker() {
        let out = sanitize(&"a".repeat(300), 160);
        assert_eq!(out.chars().count(), 160);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn text_at_exactly_max_len_is_not_clipped() {
        let input = "b".repeat(160);
        assert_eq!(sanitize(&input, 160), input);
    }

    #[test]
    fn clipping_counts_chars_not_bytes() {
        let out = sanitize(&"é".repeat(200), 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn user_label_includes_username_when_public() {
        let u = user("Alice", Some("Jones"), Some("alice"));
        assert_eq!(format_user(&u), "Alice Jones (@alice)");
    }

    #[test]
    fn user_label_without_username_is_just_the_name() {
        let u = user("Alice", Some("Jones"), None);
        assert_eq!(format_user(&u), "Alice Jones");
    }

    #[test]
    fn absent_name_parts_are_skipped() {
        let u = user("Alice", None, Some("alice"));
        assert_eq!(format_user(&u), "Alice (@alice)");
    }
}
