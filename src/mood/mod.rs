//! Keyword-weighted mood classification.
//!
//! Maps free-text chat messages to a single mood category by scoring the
//! message against the static lexicon. Classification is pure and
//! deterministic; song selection and response generation layer their own
//! randomness on top.

pub mod lexicon;

pub use lexicon::{entry_for, LexiconEntry, LEXICON};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mood categories understood by the pipeline.
///
/// Declaration order is load-bearing: when two categories score equally the
/// classifier keeps the one declared first, so emotionally specific moods
/// are listed ahead of ambient ones and the sarcastic fallback comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Sad,
    Angry,
    Stressed,
    Happy,
    Energetic,
    Confused,
    Curious,
    Bored,
    Chill,
    Focus,
    /// Default persona mood, used when nothing in the lexicon matches
    Sarcastic,
}

/// All categories in tie-break priority order.
pub const ALL_CATEGORIES: &[MoodCategory] = &[
    MoodCategory::Sad,
    MoodCategory::Angry,
    MoodCategory::Stressed,
    MoodCategory::Happy,
    MoodCategory::Energetic,
    MoodCategory::Confused,
    MoodCategory::Curious,
    MoodCategory::Bored,
    MoodCategory::Chill,
    MoodCategory::Focus,
    MoodCategory::Sarcastic,
];

/// Category returned when no lexicon entry matches.
pub const FALLBACK_CATEGORY: MoodCategory = MoodCategory::Sarcastic;

impl MoodCategory {
    /// Lowercase identifier, matching the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            MoodCategory::Sad => "sad",
            MoodCategory::Angry => "angry",
            MoodCategory::Stressed => "stressed",
            MoodCategory::Happy => "happy",
            MoodCategory::Energetic => "energetic",
            MoodCategory::Confused => "confused",
            MoodCategory::Curious => "curious",
            MoodCategory::Bored => "bored",
            MoodCategory::Chill => "chill",
            MoodCategory::Focus => "focus",
            MoodCategory::Sarcastic => "sarcastic",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            MoodCategory::Sad => "Sad",
            MoodCategory::Angry => "Angry",
            MoodCategory::Stressed => "Stressed",
            MoodCategory::Happy => "Happy",
            MoodCategory::Energetic => "Energetic",
            MoodCategory::Confused => "Confused",
            MoodCategory::Curious => "Curious",
            MoodCategory::Bored => "Bored",
            MoodCategory::Chill => "Chill",
            MoodCategory::Focus => "Focus",
            MoodCategory::Sarcastic => "Sarcastic",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for MoodCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A classification result with its aggregate lexicon score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredMood {
    /// Winning category
    pub category: MoodCategory,
    /// Aggregate lexicon score; 0.0 means nothing matched
    pub score: f32,
}

/// Score one lexicon entry against a message.
///
/// `lower` is the pre-lowercased message for keyword/phrase matching;
/// `original` keeps its case for emoji literals.
fn score_entry(entry: &LexiconEntry, lower: &str, original: &str) -> f32 {
    let mut score = 0.0;

    for keyword in entry.keywords {
        if lower.contains(keyword) {
            score += entry.weight;
        }
    }
    for phrase in entry.phrases {
        if lower.contains(phrase) {
            score += 2.0 * entry.weight;
        }
    }
    for emoji in entry.emojis {
        if original.contains(emoji) {
            score += 1.5 * entry.weight;
        }
    }

    score
}

/// Classify a message, returning the winning category and its score.
///
/// Ties keep the category declared first in [`MoodCategory`]; a zero score
/// falls back to [`FALLBACK_CATEGORY`]. Never panics, including on empty
/// input.
pub fn classify_scored(message: &str) -> ScoredMood {
    let lower = message.to_lowercase();

    let mut best = ScoredMood {
        category: FALLBACK_CATEGORY,
        score: 0.0,
    };

    for entry in LEXICON {
        let score = score_entry(entry, &lower, message);
        // Strict comparison keeps the earlier category on equal scores
        if score > best.score {
            best = ScoredMood {
                category: entry.category,
                score,
            };
        }
    }

    best
}

/// Classify a message to a single category.
pub fn classify(message: &str) -> MoodCategory {
    classify_scored(message).category
}

/// Sampling temperature for remote generation, keyed by mood.
///
/// Monotonic in expressiveness: structured moods sample conservatively,
/// high-arousal moods sample creatively.
pub fn sampling_temperature(mood: MoodCategory) -> f32 {
    match mood {
        MoodCategory::Focus => 0.55,
        MoodCategory::Confused => 0.6,
        MoodCategory::Curious => 0.65,
        MoodCategory::Stressed | MoodCategory::Sad => 0.7,
        MoodCategory::Chill => 0.75,
        MoodCategory::Bored => 0.8,
        MoodCategory::Sarcastic => 0.85,
        MoodCategory::Happy | MoodCategory::Angry => 0.9,
        MoodCategory::Energetic => 0.95,
    }
}
