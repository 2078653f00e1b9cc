//! Assembles history, reply context, and the user prompt into one request.

use crate::history::HistoryLine;

/// Role and context-usage directive sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = "You are Grok integrated into a Telegram group chat. \
     Respond concisely and helpfully using the context.";

/// A fully assembled completion request, built fresh per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_instruction: &'static str,
    /// Labeled context blocks in presentation order.
    pub blocks: Vec<String>,
}

impl CompletionRequest {
    /// Joins the context blocks into the single user-role message body.
    pub fn user_content(&self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Builds the request body from the history snapshot, an optional
/// replied-to line, and the extracted prompt.
///
/// Block order is fixed: chat history (when non-empty), then the replied
/// message (when present and not already verbatim in the history), then the
/// user prompt. The dedup check avoids repeating a replied-to message that
/// is already part of the recent window.
pub fn assemble(
    history: &[HistoryLine],
    replied: Option<&HistoryLine>,
    prompt: &str,
) -> CompletionRequest {
    let mut blocks = Vec::with_capacity(3);

    if !history.is_empty() {
        let lines: Vec<&str> = history.iter().map(|line| line.text.as_str()).collect();
        blocks.push(format!("Chat history:\n{}", lines.join("\n")));
    }

    if let Some(replied) = replied {
        if !history.iter().any(|line| line.text == replied.text) {
            blocks.push(format!("Replied message:\n{}", replied.text));
        }
    }

    blocks.push(format!("User prompt:\n{prompt}"));

    CompletionRequest {
        system_instruction: SYSTEM_INSTRUCTION,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> HistoryLine {
        HistoryLine::new(false, text)
    }

    #[test]
    fn empty_history_yields_only_the_prompt_block() {
        let request = assemble(&[], None, "what's the weather?");
        assert_eq!(request.blocks, vec!["User prompt:\nwhat's the weather?"]);
        assert_eq!(request.user_content(), "User prompt:\nwhat's the weather?");
    }

    #[test]
    fn blocks_appear_in_history_reply_prompt_order() {
        let history = vec![line("> Alice (@alice): hi"), line("> Bob: hello")];
        let replied = line("> Carol: the original question");
        let request = assemble(&history, Some(&replied), "summarize");

        assert_eq!(request.blocks.len(), 3);
        assert_eq!(
            request.blocks[0],
            "Chat history:\n> Alice (@alice): hi\n> Bob: hello"
        );
        assert_eq!(
            request.blocks[1],
            "Replied message:\n> Carol: the original question"
        );
        assert_eq!(request.blocks[2], "User prompt:\nsummarize");
    }

    #[test]
    fn replied_line_already_in_history_is_dropped() {
        let history = vec![line("> Alice (@alice): hi"), line("> Bob: hello")];
        let replied = line("> Bob: hello");
        let request = assemble(&history, Some(&replied), "what did Bob say?");

        assert_eq!(request.blocks.len(), 2);
        assert!(request.blocks.iter().all(|b| !b.starts_with("Replied")));
    }

    #[test]
    fn blocks_are_joined_by_a_blank_line() {
        let history = vec![line("> Bob: hello")];
        let request = assemble(&history, None, "hi");
        assert_eq!(
            request.user_content(),
            "Chat history:\n> Bob: hello\n\nUser prompt:\nhi"
        );
    }

    #[test]
    fn system_instruction_is_distinct_from_user_content() {
        let request = assemble(&[], None, "hi");
        assert!(!request.system_instruction.is_empty());
        assert!(!request.user_content().contains(request.system_instruction));
    }
}
