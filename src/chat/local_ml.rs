//! Local inference microservice tier.
//!
//! Talks to the fine-tuned model sidecar over HTTP: `/health` for the
//! availability probe, `/chat` for generation. Request/response shapes match
//! the sidecar's contract, with unknown fields tolerated.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::LocalMlConfig;

use super::sources::{GenerationRequest, ResponseSource, SourceError, SourceReply};

pub const LOCAL_ML_SOURCE_ID: &str = "local_ml";

/// Reply shape of the sidecar's `/chat` endpoint
#[derive(Debug, Deserialize)]
struct MlChatReply {
    response: String,
    #[serde(default)]
    model_info: Option<serde_json::Value>,
}

/// Client for the local inference sidecar.
pub struct LocalMl {
    client: reqwest::Client,
    base_url: String,
    chat_timeout: Duration,
    health_timeout: Duration,
}

impl LocalMl {
    pub fn new(client: reqwest::Client, config: &LocalMlConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_timeout: Duration::from_secs(config.chat_timeout_s),
            health_timeout: Duration::from_secs(config.health_timeout_s),
        }
    }
}

#[async_trait]
impl ResponseSource for LocalMl {
    fn id(&self) -> &'static str {
        LOCAL_ML_SOURCE_ID
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<SourceReply, SourceError> {
        let url = format!("{}/chat", self.base_url);

        let history: Vec<serde_json::Value> = request
            .history
            .iter()
            .map(|t| json!({ "role": t.role.as_str(), "content": t.content }))
            .collect();

        let response = self
            .client
            .post(&url)
            .timeout(self.chat_timeout)
            .json(&json!({
                "message": request.message,
                "conversation_history": history,
                "temperature": request.temperature,
                "max_length": request.max_tokens,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, body });
        }

        let reply: MlChatReply = response
            .json()
            .await
            .map_err(|e| SourceError::BadPayload(e.to_string()))?;

        if reply.response.trim().is_empty() {
            return Err(SourceError::BadPayload(
                "empty response from inference service".to_string(),
            ));
        }

        Ok(SourceReply::LocalMl {
            text: reply.response,
            model_info: reply
                .model_info
                .unwrap_or_else(|| json!({ "model": "local-fine-tuned" })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ml_reply_parse() {
        let reply: MlChatReply = serde_json::from_str(
            r#"{"response": "oh sure", "mood_detected": "sad", "confidence": 0.8}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "oh sure");
        assert!(reply.model_info.is_none());
    }

    #[test]
    fn test_source_id() {
        let source = LocalMl::new(reqwest::Client::new(), &LocalMlConfig::default());
        assert_eq!(source.id(), "local_ml");
        assert!(source.enabled());
    }
}
