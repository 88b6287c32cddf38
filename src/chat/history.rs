//! Conversation history normalization and windowing.
//!
//! Callers supply history per request; nothing is stored server-side. Remote
//! sources only ever see a bounded window: the most recent K turns plus at
//! most one synthesized note summarizing what came before.

use serde::{Deserialize, Serialize};

/// Speaker role for a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire name used by chat-completions APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// A single normalized conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// History entry as received on the wire.
///
/// Newer clients send role/content turns; legacy clients send
/// `{message, response}` pairs which expand to two turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Turn { role: Role, content: String },
    Legacy { message: String, response: String },
}

/// Expand wire entries into a flat turn list.
pub fn normalize(entries: &[HistoryEntry]) -> Vec<ConversationTurn> {
    let mut turns = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            HistoryEntry::Turn { role, content } => turns.push(ConversationTurn {
                role: *role,
                content: content.clone(),
            }),
            HistoryEntry::Legacy { message, response } => {
                turns.push(ConversationTurn::user(message.clone()));
                turns.push(ConversationTurn::assistant(response.clone()));
            }
        }
    }
    turns
}

/// Turns just before the window that feed the summary note
const SUMMARY_TURNS: usize = 5;

/// Per-turn character budget inside the summary note
const SUMMARY_EXTRACT_CHARS: usize = 80;

/// Truncate to at most `max` characters on a char boundary.
fn extract(content: &str, max: usize) -> &str {
    match content.char_indices().nth(max) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Bound history to the most recent `window` turns.
///
/// When older turns exist, a single system note built from short extracts of
/// the turns immediately preceding the window is prepended, so the result
/// never exceeds `window + 1` entries. The synthesis is lossy by design; it
/// only has to be stable for a given window size.
pub fn bounded_window(turns: &[ConversationTurn], window: usize) -> Vec<ConversationTurn> {
    if turns.len() <= window {
        return turns.to_vec();
    }

    let cut = turns.len() - window;
    let older = &turns[..cut];
    let recent = &turns[cut..];

    let summary_start = older.len().saturating_sub(SUMMARY_TURNS);
    let fragments: Vec<&str> = older[summary_start..]
        .iter()
        .map(|t| extract(t.content.trim(), SUMMARY_EXTRACT_CHARS))
        .filter(|f| !f.is_empty())
        .collect();

    let mut result = Vec::with_capacity(recent.len() + 1);
    if !fragments.is_empty() {
        result.push(ConversationTurn::system(format!(
            "Earlier context: {}",
            fragments.join("; ")
        )));
    }
    result.extend_from_slice(recent);
    result
}
