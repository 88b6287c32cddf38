//! Message analysis: intent, tone and music-intent extraction.
//!
//! A remote analyzer (low-temperature JSON pass against an OpenAI-compatible
//! endpoint) refines the heuristic analysis when configured. The heuristic
//! is the contract; the remote pass is best-effort and every failure path
//! lands back on it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mood::MoodCategory;

use super::history::ConversationTurn;
use super::remote::{ChatCompletionsClient, ChatMessage};

/// Coarse intent of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Question,
    Help,
    Complaint,
    Compliment,
    MusicRequest,
    EmotionalSupport,
    CasualChat,
    Other,
}

/// Preferred response length, mapped to a max-token budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLength {
    Short,
    Medium,
    Long,
}

impl ResponseLength {
    /// Token budget forwarded to generating sources
    pub fn max_tokens(&self) -> u32 {
        match self {
            ResponseLength::Short => 100,
            ResponseLength::Medium => 200,
            ResponseLength::Long => 300,
        }
    }
}

/// Structured analysis of a user message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAnalysis {
    pub intent: Intent,
    pub mood: MoodCategory,
    /// 1-10
    pub emotion_intensity: u8,
    /// 1-10, how biting the reply should be
    pub sarcasm_level: u8,
    pub requires_music: bool,
    pub requires_empathy: bool,
    pub response_length: ResponseLength,
}

const GREETING_CUES: &[&str] = &["hello", "hi", "hey", "yo", "sup"];
const MUSIC_CUES: &[&str] = &[
    "music", "song", "songs", "playlist", "recommend", "listen", "tune",
];
const FEELING_CUES: &[&str] = &["i feel", "i'm feeling", "im feeling", "feeling"];

fn contains_word(lower: &str, word: &str) -> bool {
    lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .any(|w| w == word)
}

/// Whether a message asks for music outright.
///
/// Checked against the original message independently of the analyzer, so a
/// remote analysis pass can add music intent but never veto an explicit
/// request.
pub fn wants_music(message: &str) -> bool {
    let lower = message.to_lowercase();
    MUSIC_CUES.iter().any(|cue| contains_word(&lower, cue))
}

/// Keyword-based analysis, always available.
///
/// Sarcasm defaults high and drops for sad users, mirroring the persona's
/// "sarcastic but not mean-spirited" rule. A mood declaration ("I feel sad")
/// counts as an implicit music request: the whole point of this bot is to
/// answer feelings with songs.
pub fn heuristic_analysis(message: &str, mood: MoodCategory) -> MessageAnalysis {
    let lower = message.to_lowercase();

    let sarcasm_level = match mood {
        MoodCategory::Sad => 4,
        MoodCategory::Stressed => 5,
        MoodCategory::Angry => 8,
        MoodCategory::Bored => 9,
        _ => 7,
    };

    let asks_for_music = wants_music(message);
    let states_feeling = FEELING_CUES.iter().any(|cue| lower.contains(cue));

    let intent = if GREETING_CUES.iter().any(|cue| contains_word(&lower, cue)) {
        Intent::Greeting
    } else if asks_for_music {
        Intent::MusicRequest
    } else if mood == MoodCategory::Sad || mood == MoodCategory::Stressed {
        Intent::EmotionalSupport
    } else if lower.contains("help") {
        Intent::Help
    } else if lower.contains('?') {
        Intent::Question
    } else {
        Intent::CasualChat
    };

    MessageAnalysis {
        intent,
        mood,
        emotion_intensity: 5,
        sarcasm_level,
        requires_music: asks_for_music || (states_feeling && mood != MoodCategory::Sarcastic),
        requires_empathy: mood == MoodCategory::Sad,
        response_length: ResponseLength::Medium,
    }
}

/// Lenient wire shape for the remote analyzer's JSON reply.
///
/// Every field is optional; anything missing or unparseable falls back to
/// the heuristic value.
#[derive(Debug, Deserialize)]
struct AnalysisWire {
    #[serde(default)]
    intent: Option<Intent>,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    emotion_intensity: Option<u8>,
    #[serde(default, alias = "sarcasm_level_request")]
    sarcasm_level: Option<u8>,
    #[serde(default)]
    requires_music: Option<bool>,
    #[serde(default)]
    requires_empathy: Option<bool>,
    #[serde(default, alias = "response_length_preference")]
    response_length: Option<ResponseLength>,
}

/// Remote analyzer backed by an OpenAI-compatible endpoint.
pub struct RemoteAnalyzer {
    client: ChatCompletionsClient,
}

impl RemoteAnalyzer {
    pub fn new(client: ChatCompletionsClient) -> Self {
        Self { client }
    }

    /// Analyze a message, falling back to the heuristic on any failure.
    pub async fn analyze(
        &self,
        message: &str,
        history: &[ConversationTurn],
        mood: MoodCategory,
    ) -> MessageAnalysis {
        let fallback = heuristic_analysis(message, mood);

        let context: Vec<String> = history
            .iter()
            .rev()
            .take(3)
            .rev()
            .map(|t| format!("{}: {}", t.role.as_str(), t.content))
            .collect();

        let prompt = format!(
            "Analyze this chat message and reply with JSON only, using the keys \
             intent, mood, emotion_intensity (1-10), sarcasm_level (1-10), \
             requires_music, requires_empathy, response_length (short|medium|long).\n\n\
             Message: {:?}\n\nRecent context:\n{}",
            message,
            context.join("\n"),
        );

        let messages = vec![
            ChatMessage::system("You are a conversation analyzer. Always respond with valid JSON only."),
            ChatMessage::user(prompt),
        ];

        let raw = match self.client.complete(&messages, 0.3, 500).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "Remote analysis failed, using heuristic");
                return fallback;
            }
        };

        let wire: AnalysisWire = match serde_json::from_str(raw.trim()) {
            Ok(wire) => wire,
            Err(e) => {
                debug!(error = %e, "Remote analysis returned non-JSON, using heuristic");
                return fallback;
            }
        };

        MessageAnalysis {
            intent: wire.intent.unwrap_or(fallback.intent),
            mood: wire
                .mood
                .and_then(|m| m.parse().ok())
                .unwrap_or(fallback.mood),
            emotion_intensity: wire
                .emotion_intensity
                .map(|v| v.clamp(1, 10))
                .unwrap_or(fallback.emotion_intensity),
            sarcasm_level: wire
                .sarcasm_level
                .map(|v| v.clamp(1, 10))
                .unwrap_or(fallback.sarcasm_level),
            requires_music: wire.requires_music.unwrap_or(fallback.requires_music),
            requires_empathy: wire.requires_empathy.unwrap_or(fallback.requires_empathy),
            response_length: wire.response_length.unwrap_or(fallback.response_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_request_intent() {
        let analysis = heuristic_analysis(
            "recommend me a playlist please",
            MoodCategory::Happy,
        );
        assert_eq!(analysis.intent, Intent::MusicRequest);
        assert!(analysis.requires_music);
    }

    #[test]
    fn test_feeling_statement_requests_music() {
        let analysis = heuristic_analysis("I feel sad", MoodCategory::Sad);
        assert!(analysis.requires_music);
        assert!(analysis.requires_empathy);
        assert_eq!(analysis.sarcasm_level, 4);
        assert_eq!(analysis.intent, Intent::EmotionalSupport);
    }

    #[test]
    fn test_plain_chat_no_music() {
        let analysis = heuristic_analysis("what a weird day", MoodCategory::Sarcastic);
        assert!(!analysis.requires_music);
        assert!(!analysis.requires_empathy);
        assert_eq!(analysis.sarcasm_level, 7);
    }

    #[test]
    fn test_greeting_intent() {
        let analysis = heuristic_analysis("hey there", MoodCategory::Sarcastic);
        assert_eq!(analysis.intent, Intent::Greeting);
    }

    #[test]
    fn test_bored_cranks_sarcasm() {
        let analysis = heuristic_analysis("so bored right now", MoodCategory::Bored);
        assert_eq!(analysis.sarcasm_level, 9);
    }

    #[test]
    fn test_music_cue_matches_words_not_substrings() {
        // "listening" contains "listen" as a prefix word-split gives
        // "listening", so no music cue fires here
        let analysis = heuristic_analysis("this listening device", MoodCategory::Sarcastic);
        assert_eq!(analysis.intent, Intent::CasualChat);
    }

    #[test]
    fn test_analysis_wire_lenient_parse() {
        let wire: AnalysisWire = serde_json::from_str(
            r#"{"intent": "music_request", "mood": "happy", "sarcasm_level_request": 12}"#,
        )
        .unwrap();
        assert_eq!(wire.intent, Some(Intent::MusicRequest));
        assert_eq!(wire.sarcasm_level, Some(12));
        assert!(wire.requires_music.is_none());
    }

    #[test]
    fn test_response_length_budgets() {
        assert_eq!(ResponseLength::Short.max_tokens(), 100);
        assert_eq!(ResponseLength::Medium.max_tokens(), 200);
        assert_eq!(ResponseLength::Long.max_tokens(), 300);
    }
}
