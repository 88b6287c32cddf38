//! Request/response types for the chat API.

use serde::{Deserialize, Serialize};

use crate::chat::history::HistoryEntry;

/// Incoming chat request.
///
/// Accepts both snake_case and the frontend's camelCase field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User message text
    pub message: String,

    /// Opaque caller identity, logged but not interpreted
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,

    /// Prior turns, supplied by the caller each request
    #[serde(default, alias = "conversationHistory")]
    pub conversation_history: Vec<HistoryEntry>,

    /// Per-request overrides
    #[serde(default)]
    pub options: ChatOptions,
}

/// Per-request generation overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Skip classification and use this mood
    #[serde(default, alias = "forceMood")]
    pub force_mood: Option<String>,

    /// Sampling temperature override
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Max-token override
    #[serde(default)]
    pub max_length: Option<u32>,
}

/// Standard success wrapper used by the chat and songs routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
        }
    }

    pub fn ok_with_count(data: T, count: usize) -> Self {
        Self {
            success: true,
            data,
            count: Some(count),
        }
    }
}

/// Per-source availability entry for the chat status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStatus {
    pub id: String,
    pub available: bool,
}

/// Response of `GET /chat/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStatusResponse {
    pub service_mode: String,
    pub sources: Vec<SourceStatus>,
}

/// Info about one mood category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodInfo {
    pub id: String,
    pub name: String,
    pub keywords: usize,
    pub phrases: usize,
    pub emojis: usize,
    pub weight: f32,
}

/// Response of `GET /moods`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMoodsResponse {
    pub moods: Vec<MoodInfo>,
    pub default_mood: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_minimal() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.user_id.is_none());
        assert!(req.conversation_history.is_empty());
        assert!(req.options.force_mood.is_none());
    }

    #[test]
    fn test_chat_request_camel_case_aliases() {
        let req: ChatRequest = serde_json::from_str(
            r#"{
                "message": "hi",
                "userId": "u1",
                "conversationHistory": [{"message": "hello", "response": "oh joy"}],
                "options": {"forceMood": "sad"}
            }"#,
        )
        .unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert_eq!(req.conversation_history.len(), 1);
        assert_eq!(req.options.force_mood.as_deref(), Some("sad"));
    }

    #[test]
    fn test_api_response_count_skipped_when_absent() {
        let json = serde_json::to_string(&ApiResponse::ok("x")).unwrap();
        assert!(!json.contains("count"));

        let json = serde_json::to_string(&ApiResponse::ok_with_count(vec![1, 2], 2)).unwrap();
        assert!(json.contains("\"count\":2"));
    }
}
