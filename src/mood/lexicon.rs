//! Weighted mood lexicon used by the classifier.
//!
//! Each category carries keyword, phrase and emoji lists with a base weight.
//! Phrase hits count double and emoji hits 1.5x, so a short message with an
//! expressive emoji can outrank a long one with a single weak keyword.

use super::MoodCategory;

/// Lexicon entry for a single mood category.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    /// Category this entry scores for
    pub category: MoodCategory,
    /// Single-word cues, matched as case-insensitive substrings
    pub keywords: &'static [&'static str],
    /// Multi-word cues, matched as case-insensitive substrings at 2x weight
    pub phrases: &'static [&'static str],
    /// Emoji cues, matched as case-sensitive literals at 1.5x weight
    pub emojis: &'static [&'static str],
    /// Base weight, must be > 0
    pub weight: f32,
}

pub const LEX_SAD: LexiconEntry = LexiconEntry {
    category: MoodCategory::Sad,
    keywords: &[
        "sad", "depressed", "unhappy", "crying", "upset", "lonely", "hurt", "miserable",
        "heartbroken",
    ],
    phrases: &["feel bad", "feeling down", "want to cry", "life sucks"],
    emojis: &["😢", "😭", "💔"],
    weight: 1.0,
};

pub const LEX_ANGRY: LexiconEntry = LexiconEntry {
    category: MoodCategory::Angry,
    keywords: &[
        "angry", "mad", "furious", "hate", "annoyed", "pissed", "irritated", "rage",
    ],
    phrases: &["fed up", "sick of", "pisses me off", "so done with"],
    emojis: &["😡", "🤬"],
    weight: 1.0,
};

pub const LEX_STRESSED: LexiconEntry = LexiconEntry {
    category: MoodCategory::Stressed,
    keywords: &[
        "stressed", "overwhelmed", "anxious", "worried", "panic", "deadline", "exhausted",
    ],
    phrases: &["under pressure", "freaking out", "too much to do", "can't cope"],
    emojis: &["😰", "😫"],
    weight: 1.0,
};

pub const LEX_HAPPY: LexiconEntry = LexiconEntry {
    category: MoodCategory::Happy,
    keywords: &[
        "happy", "excited", "joy", "awesome", "fantastic", "amazing", "wonderful", "glad",
    ],
    phrases: &["good day", "feeling great", "so happy", "best day"],
    emojis: &["😊", "😄", "🎉"],
    weight: 1.0,
};

pub const LEX_ENERGETIC: LexiconEntry = LexiconEntry {
    category: MoodCategory::Energetic,
    keywords: &["energetic", "pumped", "hyped", "unstoppable", "adrenaline"],
    phrases: &["lets go", "let's go", "full of energy", "ready to run"],
    emojis: &["🔥", "💪", "⚡"],
    weight: 1.0,
};

pub const LEX_CONFUSED: LexiconEntry = LexiconEntry {
    category: MoodCategory::Confused,
    keywords: &["confused", "unclear", "huh", "baffled"],
    phrases: &["don't understand", "what do you mean", "makes no sense", "i'm lost"],
    emojis: &["😵"],
    weight: 1.0,
};

// Question words are everywhere, so curiosity scores at reduced weight and
// only wins when nothing emotional is present.
pub const LEX_CURIOUS: LexiconEntry = LexiconEntry {
    category: MoodCategory::Curious,
    keywords: &["curious", "wonder", "explain", "how", "why"],
    phrases: &["tell me about", "what is", "how does", "how do"],
    emojis: &["🤔"],
    weight: 0.6,
};

pub const LEX_BORED: LexiconEntry = LexiconEntry {
    category: MoodCategory::Bored,
    keywords: &["bored", "boring", "dull", "meh", "blah"],
    phrases: &["nothing to do", "so bored", "kill some time"],
    emojis: &["🥱", "😴"],
    weight: 1.0,
};

pub const LEX_CHILL: LexiconEntry = LexiconEntry {
    category: MoodCategory::Chill,
    keywords: &["chill", "relax", "relaxed", "mellow", "unwind", "cozy"],
    phrases: &["take it easy", "chill out", "wind down"],
    emojis: &["😌", "🧘"],
    weight: 1.0,
};

pub const LEX_FOCUS: LexiconEntry = LexiconEntry {
    category: MoodCategory::Focus,
    keywords: &["focus", "study", "concentrate", "productive", "grind"],
    phrases: &["need to focus", "deep work", "get things done"],
    emojis: &["📚"],
    weight: 0.8,
};

pub const LEX_SARCASTIC: LexiconEntry = LexiconEntry {
    category: MoodCategory::Sarcastic,
    keywords: &["sarcastic", "sarcasm", "roast", "witty"],
    phrases: &["roast me", "be honest with me"],
    emojis: &["🙄", "😏"],
    weight: 0.8,
};

/// All lexicon entries in tie-break priority order.
///
/// Must stay in the same order as the `MoodCategory` declaration; the
/// classifier keeps the first category on equal scores.
pub const LEXICON: &[LexiconEntry] = &[
    LEX_SAD,
    LEX_ANGRY,
    LEX_STRESSED,
    LEX_HAPPY,
    LEX_ENERGETIC,
    LEX_CONFUSED,
    LEX_CURIOUS,
    LEX_BORED,
    LEX_CHILL,
    LEX_FOCUS,
    LEX_SARCASTIC,
];

/// Find the lexicon entry for a category.
pub fn entry_for(category: MoodCategory) -> &'static LexiconEntry {
    // LEXICON is exhaustive over the enum, checked in tests.
    LEXICON
        .iter()
        .find(|e| e.category == category)
        .unwrap_or(&LEX_SARCASTIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::ALL_CATEGORIES;

    #[test]
    fn test_lexicon_covers_all_categories() {
        for category in ALL_CATEGORIES {
            let entry = entry_for(*category);
            assert_eq!(entry.category, *category);
            assert!(
                !entry.keywords.is_empty() || !entry.phrases.is_empty() || !entry.emojis.is_empty(),
                "category {} has an empty lexicon entry",
                category
            );
        }
    }

    #[test]
    fn test_lexicon_order_matches_enum_order() {
        let lexicon_order: Vec<MoodCategory> = LEXICON.iter().map(|e| e.category).collect();
        assert_eq!(lexicon_order, ALL_CATEGORIES.to_vec());
    }

    #[test]
    fn test_weights_positive() {
        for entry in LEXICON {
            assert!(
                entry.weight > 0.0,
                "category {} has non-positive weight",
                entry.category
            );
        }
    }
}
