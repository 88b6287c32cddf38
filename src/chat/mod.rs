//! Response generation pipeline.
//!
//! A chat request flows through mood classification, message analysis and an
//! ordered chain of generating sources (remote LLMs, local inference
//! sidecar, canned patterns). The chain degrades tier by tier; the pattern
//! tier cannot fail, so neither can the pipeline.

pub mod analysis;
pub mod availability;
pub mod history;
pub mod local_ml;
pub mod orchestrator;
pub mod patterns;
pub mod remote;
pub mod sources;

pub use analysis::{heuristic_analysis, Intent, MessageAnalysis, RemoteAnalyzer, ResponseLength};
pub use availability::{spawn_health_probe, AvailabilityRegistry, ProbeHandle};
pub use history::{ConversationTurn, HistoryEntry, Role};
pub use orchestrator::{Orchestrator, ResponseEnvelope};
pub use patterns::{PatternResponder, PATTERN_SOURCE_ID};
pub use sources::{GenerationRequest, ResponseSource, SourceError, SourceReply};
