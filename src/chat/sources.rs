//! Response source abstraction.
//!
//! Every generating tier implements [`ResponseSource`]; the orchestrator
//! walks them in priority order and falls through on error. The terminal
//! pattern tier lives outside the chain so the pipeline's no-throw guarantee
//! is structural rather than conventional.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::mood::MoodCategory;

use super::analysis::MessageAnalysis;
use super::history::ConversationTurn;

/// Error type for response generation
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source disabled: no credentials configured")]
    Disabled,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed completion payload: {0}")]
    BadPayload(String),
}

/// Everything a generating tier needs for one request.
///
/// History is already bounded by the orchestrator; sources forward it as-is.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub message: String,
    pub history: Vec<ConversationTurn>,
    pub mood: MoodCategory,
    pub analysis: MessageAnalysis,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Output of a generating tier, tagged by where it came from.
///
/// Each variant carries only what that tier can actually produce; the
/// orchestrator normalizes them into the response envelope.
#[derive(Debug, Clone)]
pub enum SourceReply {
    RemoteLlm {
        text: String,
        provider: &'static str,
        model: String,
    },
    LocalMl {
        text: String,
        model_info: Value,
    },
    Pattern {
        text: String,
        bank: &'static str,
    },
}

impl SourceReply {
    /// Generated text
    pub fn text(&self) -> &str {
        match self {
            SourceReply::RemoteLlm { text, .. } => text,
            SourceReply::LocalMl { text, .. } => text,
            SourceReply::Pattern { text, .. } => text,
        }
    }
}

/// A generating tier in the response source chain.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// Stable identifier, used for availability flags and the envelope
    /// `source` field
    fn id(&self) -> &'static str;

    /// Whether the source is configured at all (e.g. has credentials).
    /// Disabled sources are skipped without an availability check.
    fn enabled(&self) -> bool {
        true
    }

    /// Availability probe for the background health check.
    ///
    /// Sources without a cheap health endpoint report `true`, which
    /// re-enables them optimistically on the next probe tick.
    async fn probe(&self) -> bool {
        true
    }

    /// Generate a reply. Any error advances the chain to the next tier.
    async fn generate(&self, request: &GenerationRequest) -> Result<SourceReply, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_reply_text_accessor() {
        let reply = SourceReply::Pattern {
            text: "well, well".to_string(),
            bank: "greeting",
        };
        assert_eq!(reply.text(), "well, well");

        let reply = SourceReply::RemoteLlm {
            text: "hello".to_string(),
            provider: "groq",
            model: "llama".to_string(),
        };
        assert_eq!(reply.text(), "hello");
    }
}
