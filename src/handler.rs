//! Handler for group-chat messages, registered in the teloxide Dispatcher.

use std::sync::Arc;

use log::{debug, error, info};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ReplyParameters};

use crate::bot::AppState;
use crate::context;
use crate::mention::{self, Mention};
use crate::snippet;

/// Runs for every group/supergroup message. Records the message in the
/// rolling history, and when the bot is mentioned, forwards the prompt with
/// its context to Grok and replies with the answer.
///
/// A failed completion call becomes a placeholder reply; it never takes the
/// dispatcher down or affects other chats.
pub async fn handle_group_message(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let identity = match state.identity(&bot).await {
        Ok(identity) => identity,
        Err(e) => {
            error!("Failed to resolve bot identity: {}", e);
            return Ok(());
        }
    };

    // Channel posts and service messages carry no sender to attribute.
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let from_bot = from.id == identity.id;

    // Every message feeds the context window, mentioned or not.
    let line = snippet::format_line(&msg, identity, from_bot, state.config.max_snippet_len);
    state.history.append(chat_id, line);

    let text = msg.text().unwrap_or("");
    let prompt = match mention::detect(text, &identity.mention) {
        Mention::NotAddressed => return Ok(()),
        Mention::EmptyPrompt => {
            bot.send_message(
                chat_id,
                format!(
                    "Add a prompt after mentioning me, e.g. {} what's up?",
                    identity.mention
                ),
            )
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
            return Ok(());
        }
        Mention::Prompt(prompt) => prompt,
    };

    info!(
        "Mention from {} in chat {}: {}",
        snippet::format_user(from),
        chat_id,
        prompt
    );

    let replied_line = msg.reply_to_message().map(|replied| {
        let replied_from_bot = replied
            .from
            .as_ref()
            .is_some_and(|user| user.id == identity.id);
        snippet::format_line(
            replied,
            identity,
            replied_from_bot,
            state.config.max_snippet_len,
        )
    });

    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        debug!("Failed to send typing action: {}", e);
    }

    let history = state.history.snapshot(chat_id);
    let request = context::assemble(&history, replied_line.as_ref(), &prompt);

    let answer = match state.grok.complete(&request).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("Completion failed for chat {}: {}", chat_id, e);
            e.user_message()
        }
    };

    let sent = bot.send_message(chat_id, answer).await?;

    let bot_line = snippet::format_line(&sent, identity, true, state.config.max_snippet_len);
    state.history.append(chat_id, bot_line);

    Ok(())
}
