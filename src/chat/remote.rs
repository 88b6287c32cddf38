//! Remote LLM tier: OpenAI-compatible chat-completions client.
//!
//! One client type covers every provider in the chain (Groq, Grok, OpenAI);
//! only base URL, model and credentials differ. Non-2xx responses, timeouts
//! and malformed payloads all surface as `SourceError` so the orchestrator
//! can fall through.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

use crate::config::RemoteSourceConfig;

use super::sources::{GenerationRequest, ResponseSource, SourceError, SourceReply};

/// One message in a chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Thin client for a `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl ChatCompletionsClient {
    pub fn new(client: reqwest::Client, config: &RemoteSourceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_s),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one completion and return the first choice's content.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, SourceError> {
        let api_key = self.api_key.as_ref().ok_or(SourceError::Disabled)?;
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "temperature": temperature,
                "max_tokens": max_tokens,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, body });
        }

        let data: serde_json::Value = response.json().await?;
        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SourceError::BadPayload("no completion content in response".to_string()))
    }
}

/// A remote LLM generation tier.
pub struct RemoteLlm {
    id: &'static str,
    client: ChatCompletionsClient,
}

impl RemoteLlm {
    pub fn new(id: &'static str, client: ChatCompletionsClient) -> Self {
        Self { id, client }
    }
}

/// Persona instructions for a generation request.
///
/// Mirrors what the analysis asked for: sarcasm level, tone, mood awareness
/// and the empathy/music hints when they apply.
pub fn persona_prompt(request: &GenerationRequest) -> String {
    let analysis = &request.analysis;
    let mut prompt = format!(
        "You are Mr. Sarcastic, a witty AI chatbot with a sharp sense of humor. \
         Your responses should be cleverly sarcastic (level {}/10), entertaining, \
         and sensitive to the user's {} mood.",
        analysis.sarcasm_level, request.mood,
    );

    if analysis.requires_empathy {
        prompt.push_str(" Be empathetic despite the sarcasm.");
    }
    if analysis.requires_music {
        prompt.push_str(" Music comes up naturally in this chat; lean into it.");
    }
    prompt.push_str(" You're sarcastic but not mean-spirited: entertain, don't hurt.");

    prompt
}

/// Build the full message list for a generation request.
///
/// The bounded history rides between the persona and the user's message, so
/// the payload carries at most `window + 1` history entries plus those two.
pub fn build_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ChatMessage::system(persona_prompt(request)));
    for turn in &request.history {
        messages.push(ChatMessage {
            role: turn.role.as_str(),
            content: turn.content.clone(),
        });
    }
    messages.push(ChatMessage::user(request.message.clone()));
    messages
}

#[async_trait]
impl ResponseSource for RemoteLlm {
    fn id(&self) -> &'static str {
        self.id
    }

    fn enabled(&self) -> bool {
        self.client.has_credentials()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<SourceReply, SourceError> {
        let messages = build_messages(request);
        let text = self
            .client
            .complete(&messages, request.temperature, request.max_tokens)
            .await?;

        Ok(SourceReply::RemoteLlm {
            text,
            provider: self.id,
            model: self.client.model().to_string(),
        })
    }
}
