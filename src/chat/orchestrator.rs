//! Response orchestrator: classify, walk the source chain, enrich, normalize.
//!
//! The public entry point is a total function: whatever the remote tiers do,
//! the terminal pattern tier produces a valid envelope. Source failures are
//! logged, flagged in the availability registry and swallowed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::catalog::{Song, SongCatalog};
use crate::config::AppConfig;
use crate::mood::{self, MoodCategory};

use super::analysis::{heuristic_analysis, MessageAnalysis, RemoteAnalyzer};
use super::availability::AvailabilityRegistry;
use super::history;
use super::local_ml::{LocalMl, LOCAL_ML_SOURCE_ID};
use super::patterns::{PatternResponder, PATTERN_SOURCE_ID};
use super::remote::{ChatCompletionsClient, RemoteLlm};
use super::sources::{GenerationRequest, ResponseSource, SourceReply};
use crate::types::api::ChatRequest;

/// Source ids for the two remote generation tiers
pub const PRIMARY_SOURCE_ID: &str = "groq";
pub const SECONDARY_SOURCE_ID: &str = "grok";

/// Normalized pipeline output, returned for every request.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub text: String,
    pub mood: MoodCategory,
    pub confidence: f32,
    pub source: String,
    #[serde(rename = "songData", skip_serializing_if = "Option::is_none")]
    pub song_data: Option<Song>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MessageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_info: Option<serde_json::Value>,
    #[serde(rename = "generation_time")]
    pub generation_time_ms: u64,
}

/// Reported operating mode, by which tiers are currently usable
fn service_mode_label(primary: bool, secondary: bool, local_ml: bool) -> &'static str {
    if primary && secondary {
        "dual_model_premium"
    } else if primary || secondary {
        "single_model_fallback"
    } else if local_ml {
        "local_ml_fallback"
    } else {
        "pattern_fallback"
    }
}

pub struct Orchestrator {
    sources: Vec<Arc<dyn ResponseSource>>,
    patterns: PatternResponder,
    registry: Arc<AvailabilityRegistry>,
    analyzer: Option<RemoteAnalyzer>,
    catalog: Arc<SongCatalog>,
    history_window: usize,
    rng: Mutex<StdRng>,
}

impl Orchestrator {
    /// Build the full chain from configuration.
    ///
    /// Pass a seed to pin template and song selection in tests; production
    /// uses entropy.
    pub fn from_config(config: &AppConfig, catalog: Arc<SongCatalog>, seed: Option<u64>) -> Self {
        let http = reqwest::Client::new();

        let primary = RemoteLlm::new(
            PRIMARY_SOURCE_ID,
            ChatCompletionsClient::new(http.clone(), &config.sources.primary),
        );
        let secondary = RemoteLlm::new(
            SECONDARY_SOURCE_ID,
            ChatCompletionsClient::new(http.clone(), &config.sources.secondary),
        );
        let local_ml = LocalMl::new(http.clone(), &config.local_ml);

        let sources: Vec<Arc<dyn ResponseSource>> =
            vec![Arc::new(primary), Arc::new(secondary), Arc::new(local_ml)];

        // Remote tiers start optimistic; the local sidecar starts down and
        // is promoted by its first successful health probe.
        let registry = Arc::new(AvailabilityRegistry::new(&[
            (PRIMARY_SOURCE_ID, true),
            (SECONDARY_SOURCE_ID, true),
            (LOCAL_ML_SOURCE_ID, false),
        ]));

        let analyzer = config
            .sources
            .analyzer
            .api_key
            .is_some()
            .then(|| RemoteAnalyzer::new(ChatCompletionsClient::new(http, &config.sources.analyzer)));

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            sources,
            patterns: PatternResponder::new(),
            registry,
            analyzer,
            catalog,
            history_window: config.chat.history_window,
            rng: Mutex::new(rng),
        }
    }

    /// Availability registry shared with the health probe
    pub fn registry(&self) -> Arc<AvailabilityRegistry> {
        self.registry.clone()
    }

    /// Configured chain sources, for the health probe
    pub fn sources(&self) -> Vec<Arc<dyn ResponseSource>> {
        self.sources.clone()
    }

    fn source_usable(&self, id: &str) -> bool {
        self.sources
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.enabled() && self.registry.is_up(id))
            .unwrap_or(false)
    }

    /// Current operating mode, for the status endpoint
    pub fn service_mode(&self) -> &'static str {
        service_mode_label(
            self.source_usable(PRIMARY_SOURCE_ID),
            self.source_usable(SECONDARY_SOURCE_ID),
            self.source_usable(LOCAL_ML_SOURCE_ID),
        )
    }

    /// Per-source availability snapshot for the status endpoint
    pub fn availability(&self) -> Vec<(&'static str, bool)> {
        self.sources
            .iter()
            .map(|s| (s.id(), s.enabled() && self.registry.is_up(s.id())))
            .collect()
    }

    /// Shuffle-pick songs for a mood name or catalog tag.
    pub async fn songs_for_mood_str(&self, mood: &str, n: usize) -> Vec<Song> {
        let mut rng = self.rng.lock().await;
        match mood.parse::<MoodCategory>() {
            Ok(category) => self.catalog.pick_for_mood(category, n, &mut *rng),
            Err(()) => self.catalog.pick_for_tag(mood, n, &mut *rng),
        }
    }

    /// Generate a response for one chat request.
    ///
    /// Never fails: every error inside the chain falls through to the
    /// pattern tier, which is total.
    pub async fn respond(&self, request: ChatRequest) -> ResponseEnvelope {
        let started = Instant::now();

        let scored = mood::classify_scored(&request.message);
        let forced: Option<MoodCategory> = request
            .options
            .force_mood
            .as_deref()
            .and_then(|m| m.parse().ok());
        let mood = forced.unwrap_or(scored.category);

        let turns = history::normalize(&request.conversation_history);
        let window = history::bounded_window(&turns, self.history_window);

        let analysis = match &self.analyzer {
            Some(analyzer) => analyzer.analyze(&request.message, &window, mood).await,
            None => heuristic_analysis(&request.message, mood),
        };

        let generation = GenerationRequest {
            message: request.message.clone(),
            history: window,
            mood,
            analysis: analysis.clone(),
            temperature: request
                .options
                .temperature
                .unwrap_or_else(|| mood::sampling_temperature(mood)),
            max_tokens: request
                .options
                .max_length
                .unwrap_or_else(|| analysis.response_length.max_tokens()),
        };

        let reply = self.walk_chain(&generation).await;

        let (mut text, source, model_info) = match reply {
            SourceReply::RemoteLlm {
                text,
                provider,
                model,
            } => (
                text,
                provider.to_string(),
                json!({ "model": model, "provider": provider }),
            ),
            SourceReply::LocalMl { text, model_info } => {
                (text, LOCAL_ML_SOURCE_ID.to_string(), model_info)
            }
            SourceReply::Pattern { text, bank } => (
                text,
                PATTERN_SOURCE_ID.to_string(),
                json!({ "model": "pattern-based", "bank": bank }),
            ),
        };

        let wants_song = analysis.requires_music || super::analysis::wants_music(&request.message);
        let song_data = if wants_song {
            self.attach_recommendation(&mut text, mood).await
        } else {
            None
        };

        let confidence = self.confidence_for(&source, scored.score, forced.is_some());
        let generation_time_ms = started.elapsed().as_millis() as u64;

        info!(
            source = %source,
            mood = %mood,
            confidence,
            elapsed_ms = generation_time_ms,
            has_song = song_data.is_some(),
            "Response generated"
        );

        ResponseEnvelope {
            text,
            mood,
            confidence,
            source,
            song_data,
            analysis: Some(analysis),
            model_info: Some(model_info),
            generation_time_ms,
        }
    }

    /// Try each chain tier in priority order, ending on the pattern tier.
    async fn walk_chain(&self, generation: &GenerationRequest) -> SourceReply {
        for source in &self.sources {
            if !source.enabled() {
                continue;
            }
            if !self.registry.is_up(source.id()) {
                continue;
            }

            match source.generate(generation).await {
                Ok(reply) => return reply,
                Err(e) => {
                    warn!(source = source.id(), error = %e, "Response source failed, advancing chain");
                    self.registry.mark_down(source.id());
                }
            }
        }

        let mut rng = self.rng.lock().await;
        let (text, bank) = self
            .patterns
            .respond(&generation.message, generation.mood, &mut *rng);
        SourceReply::Pattern { text, bank }
    }

    /// Pick songs for the detected mood and append the recommendation block.
    ///
    /// An empty match set degrades to a textual apology; it never errors.
    async fn attach_recommendation(
        &self,
        text: &mut String,
        mood: MoodCategory,
    ) -> Option<Song> {
        let picks = {
            let mut rng = self.rng.lock().await;
            self.catalog.pick_for_mood(mood, 2, &mut *rng)
        };

        if picks.is_empty() {
            text.push_str(&format!(
                "\n\n🎵 I'd suggest something for your {} mood, but the song catalog is empty. Tragic.",
                mood
            ));
            return None;
        }

        let listing = picks
            .iter()
            .map(|s| format!("\"{}\" by {}", s.title, s.artist))
            .collect::<Vec<_>>()
            .join(" or ");
        text.push_str(&format!(
            "\n\n🎵 Music suggestion for your {} mood: {}",
            mood, listing
        ));

        picks.into_iter().next()
    }

    /// Envelope confidence: per-tier base, dampened when the classifier saw
    /// nothing and the mood is a pure fallback.
    fn confidence_for(&self, source: &str, score: f32, forced: bool) -> f32 {
        let base: f32 = match source {
            PATTERN_SOURCE_ID => 0.6,
            LOCAL_ML_SOURCE_ID => 0.75,
            _ => 0.9,
        };
        if score <= 0.0 && !forced {
            base.min(0.5)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SongCatalog;
    use crate::types::api::ChatOptions;

    fn sad_song() -> Song {
        Song {
            id: "s1".to_string(),
            title: "I Can't Say Goodbye To You".to_string(),
            artist: "Helen Reddy".to_string(),
            mood: "Sad".to_string(),
            duration: "3:30".to_string(),
            youtube_url: "https://youtube.com/watch?v=O3VInGi9OLU".to_string(),
            thumbnail: None,
        }
    }

    /// Orchestrator with no usable network tiers: remote keys unset, local
    /// sidecar marked down. Everything lands on the pattern tier.
    fn offline_orchestrator(catalog: SongCatalog) -> Orchestrator {
        Orchestrator::from_config(&AppConfig::default(), Arc::new(catalog), Some(42))
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            user_id: None,
            conversation_history: Vec::new(),
            options: ChatOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_respond_is_total_with_all_tiers_down() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());

        let envelope = orchestrator.respond(request("Hello there")).await;
        assert!(!envelope.text.is_empty());
        assert_eq!(envelope.source, PATTERN_SOURCE_ID);
    }

    #[tokio::test]
    async fn test_sad_message_recommends_catalog_song() {
        let orchestrator = offline_orchestrator(SongCatalog::from_songs(vec![sad_song()]));

        let envelope = orchestrator.respond(request("I feel sad")).await;

        assert_eq!(envelope.mood, MoodCategory::Sad);
        assert_eq!(envelope.source, PATTERN_SOURCE_ID);
        let song = envelope.song_data.expect("song recommendation expected");
        assert_eq!(song.id, "s1");
        assert!(envelope.text.contains("Music suggestion"));
    }

    #[tokio::test]
    async fn test_song_data_references_catalog() {
        let catalog = SongCatalog::from_songs(vec![sad_song()]);
        let orchestrator = offline_orchestrator(catalog.clone());

        let envelope = orchestrator.respond(request("play me a sad song")).await;
        if let Some(song) = &envelope.song_data {
            assert!(catalog.by_id(&song.id).is_some());
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_music_request_degrades_gracefully() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());

        let envelope = orchestrator
            .respond(request("recommend me some music please"))
            .await;
        assert!(envelope.song_data.is_none());
        assert!(envelope.text.contains("catalog is empty"));
    }

    #[tokio::test]
    async fn test_no_music_intent_no_song() {
        let orchestrator = offline_orchestrator(SongCatalog::from_songs(vec![sad_song()]));

        let envelope = orchestrator.respond(request("what a day, huh")).await;
        assert!(envelope.song_data.is_none());
    }

    #[tokio::test]
    async fn test_forced_mood_overrides_classifier() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());

        let mut req = request("I feel sad");
        req.options.force_mood = Some("happy".to_string());
        let envelope = orchestrator.respond(req).await;
        assert_eq!(envelope.mood, MoodCategory::Happy);
    }

    #[tokio::test]
    async fn test_confidence_dampened_without_lexicon_match() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());

        let envelope = orchestrator.respond(request("qwertyuiop")).await;
        assert!(envelope.confidence <= 0.5);

        let envelope = orchestrator.respond(request("I feel sad")).await;
        assert!((envelope.confidence - 0.6).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_service_mode_offline() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());
        assert_eq!(orchestrator.service_mode(), "pattern_fallback");
    }

    #[test]
    fn test_service_mode_labels() {
        assert_eq!(service_mode_label(true, true, false), "dual_model_premium");
        assert_eq!(
            service_mode_label(true, false, false),
            "single_model_fallback"
        );
        assert_eq!(
            service_mode_label(false, true, true),
            "single_model_fallback"
        );
        assert_eq!(service_mode_label(false, false, true), "local_ml_fallback");
        assert_eq!(service_mode_label(false, false, false), "pattern_fallback");
    }

    #[tokio::test]
    async fn test_envelope_serialization_skips_absent_song() {
        let orchestrator = offline_orchestrator(SongCatalog::empty());

        let envelope = orchestrator.respond(request("hello")).await;
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("songData"));
        assert!(json.contains("generation_time"));
        assert!(json.contains("\"source\":\"patterns\""));
    }
}
