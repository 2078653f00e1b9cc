//! HTTP client for xAI's Grok chat completions endpoint.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::context::CompletionRequest;
use crate::error::{BotError, Result};

const GROK_API_URL: &str = "https://api.x.ai/v1/chat/completions";
const GROK_MODEL: &str = "grok-4";

/// Role of a message in the completions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct GrokClient {
    api_key: String,
    client: reqwest::Client,
}

impl GrokClient {
    /// Builds a client with a bounded per-call timeout.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, client })
    }

    /// Sends the assembled request to Grok and returns the answer text.
    ///
    /// One POST, no retries. Every failure mode maps to a `BotError` whose
    /// `user_message()` is safe to relay to the chat: a missing credential
    /// is detected before any network call, non-2xx statuses become
    /// `GrokApi`, connection problems and timeouts become `Transport`, and
    /// schema-violating bodies become `MalformedResponse`.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(BotError::MissingCredential("XAI_API_KEY"));
        }

        let user_content = request.user_content();
        let payload = ChatRequest {
            model: GROK_MODEL,
            messages: vec![
                WireMessage {
                    role: Role::System,
                    content: request.system_instruction,
                },
                WireMessage {
                    role: Role::User,
                    content: &user_content,
                },
            ],
        };

        debug!(
            "Sending completion request to Grok ({} context blocks)",
            request.blocks.len()
        );

        let response = self
            .client
            .post(GROK_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::GrokApi { status });
        }

        let body = response.text().await?;
        let answer = extract_answer(&body)?;
        debug!("Received completion from Grok ({} chars)", answer.len());
        Ok(answer)
    }
}

/// Pulls `choices[0].message.content` out of a response body.
fn extract_answer(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| BotError::MalformedResponse(format!("invalid completion body: {e}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| BotError::MalformedResponse("no choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use crate::context::assemble;

    use super::*;

    #[test]
    fn payload_has_system_then_user_roles() {
        let request = assemble(&[], None, "hello");
        let user_content = request.user_content();
        let payload = ChatRequest {
            model: GROK_MODEL,
            messages: vec![
                WireMessage {
                    role: Role::System,
                    content: request.system_instruction,
                },
                WireMessage {
                    role: Role::User,
                    content: &user_content,
                },
            ],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["model"], "grok-4");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "User prompt:\nhello");
    }

    #[test]
    fn answer_text_is_extracted_from_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"42"}}]}"#;
        assert_eq!(extract_answer(body).unwrap(), "42");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = extract_answer(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn missing_content_field_is_malformed() {
        let err = extract_answer(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = extract_answer("<html>upstream error</html>").unwrap_err();
        assert!(matches!(err, BotError::MalformedResponse(_)));
    }
}
