//! Prompt assembly for the completion provider

use crate::api::HistoryEntry;
use crate::llm::LlmMessage;

/// Persona instruction placed first in every prompt
pub const SYSTEM_PROMPT: &str = "You are WorkSpaceAI, an AI-powered unified work assistant designed to improve productivity by summarizing emails, documents, and pull requests, and by answering work-related questions. You act as a professional, intelligent, and concise assistant.";

/// Build `[system, ...history, user: message]`.
///
/// History order and roles are preserved as given; nothing is deduplicated
/// or trimmed.
pub fn build_prompt(history: &[HistoryEntry], message: &str) -> Vec<LlmMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(LlmMessage::system(SYSTEM_PROMPT));
    messages.extend(
        history
            .iter()
            .map(|entry| LlmMessage::new(entry.role.into(), entry.content.clone())),
    );
    messages.push(LlmMessage::user(message));
    messages
}
