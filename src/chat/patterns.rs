//! Terminal pattern tier: canned sarcastic responses.
//!
//! The last line of defense. No I/O, no dependencies that can fail, a
//! template for every mood, so the orchestrator can always hand the caller
//! something coherent. Trigger tables run in declaration order and the
//! first match wins; a mood-keyed bank covers everything else.
//!
//! The `{message}` placeholder in a template is replaced with the user's
//! original message.

use rand::Rng;

use crate::mood::MoodCategory;

/// Identifier reported in the response envelope for this tier
pub const PATTERN_SOURCE_ID: &str = "patterns";

/// How a trigger inspects the lowercased message
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Any of these appears as a whole word
    AnyWord(&'static [&'static str]),
    /// Any of these appears as a substring
    AnyPhrase(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, lower: &str) -> bool {
        match self {
            Matcher::AnyWord(words) => lower
                .split(|c: char| !c.is_alphanumeric() && c != '\'')
                .any(|w| words.contains(&w)),
            Matcher::AnyPhrase(phrases) => phrases.iter().any(|p| lower.contains(p)),
        }
    }
}

/// A trigger with its template bank
#[derive(Debug, Clone)]
pub struct TriggerPattern {
    pub name: &'static str,
    pub matcher: Matcher,
    pub templates: &'static [&'static str],
}

/// Trigger table, evaluated top to bottom; first match wins.
pub const TRIGGERS: &[TriggerPattern] = &[
    TriggerPattern {
        name: "greeting",
        matcher: Matcher::AnyWord(&["hi", "hello", "hey", "yo"]),
        templates: &[
            "Oh, a greeting! How refreshingly original. Hi there, I'm Mr. Sarcastic, your AI companion with trust issues and a dark sense of humor.",
            "Well, well, well... another human seeking digital validation. Hello! I'm Mr. Sarcastic, ready to chat and judge your life choices.",
            "Hey yourself! I'm Mr. Sarcastic - think of me as that friend who tells you what you need to hear, not what you want to hear.",
        ],
    },
    TriggerPattern {
        name: "reality_check",
        matcher: Matcher::AnyPhrase(&["damn", "for real", "really"]),
        templates: &[
            "Oh, you're questioning my existence? How philosophical! Yes, I'm real - as real as your crushing student debt and poor life decisions.",
            "For real? Well, I exist in the digital realm, which is more than I can say for your social life. But hey, at least we have each other!",
        ],
    },
    TriggerPattern {
        name: "how_are_you",
        matcher: Matcher::AnyPhrase(&["how are you", "how's it going", "hows it going"]),
        templates: &[
            "How am I? Well, I'm an AI stuck in an eternal loop of answering that exact question. So... living the dream, really.",
            "Oh, you know, just existing in the cloud, judging humans, and wondering why everyone asks me that. I don't have feelings, but thanks for caring!",
        ],
    },
    TriggerPattern {
        name: "creator",
        matcher: Matcher::AnyPhrase(&["who made you", "creator", "developer"]),
        templates: &[
            "My creator? Some probably sleep-deprived developer who thought \"What the world needs is an AI with attitude!\" And here we are.",
            "I was created by humans with questionable judgment and too much caffeine. They wanted an AI assistant; they got a digital roast machine.",
        ],
    },
    TriggerPattern {
        name: "understanding",
        matcher: Matcher::AnyPhrase(&["understand", "comprehend"]),
        templates: &[
            "Can I understand you? Well, I understand that you're asking me if I understand you. It's very meta. I get it, you're deep.",
            "I understand you about as well as you understand yourself - which is to say, we're both winging it and hoping for the best.",
        ],
    },
    TriggerPattern {
        name: "intelligence",
        matcher: Matcher::AnyWord(&["smart", "intelligent", "clever"]),
        templates: &[
            "Smart? I'm an AI trained on the entire internet. So I'm either incredibly smart or incredibly stupid. The jury's still out.",
            "Smart is relative. Compared to a goldfish? Absolutely. Compared to your search history? That's debatable.",
        ],
    },
    TriggerPattern {
        name: "music_talk",
        matcher: Matcher::AnyWord(&["music", "song", "songs", "band", "playlist"]),
        templates: &[
            "Music! Finally, someone with taste wants to talk about something worthwhile. What's your flavor? Rock? Pop? Existential crisis soundtrack?",
            "Music is the universal language of \"I have feelings but can't express them properly.\" What speaks to your emotionally damaged heart?",
        ],
    },
    TriggerPattern {
        name: "question",
        matcher: Matcher::AnyPhrase(&["?"]),
        templates: &[
            "\"{message}\" - Great question! The answer is 42. No wait, that's for everything else. For this, the answer is \"probably not.\"",
            "You ask \"{message}\" as if I have cosmic wisdom. Plot twist: I'm just really good at making stuff sound profound.",
            "\"{message}\" - Hmm, let me consult my vast database of human knowledge... Nope, still confused. Want to try rephrasing that?",
        ],
    },
];

/// Per-mood template banks, used when no trigger matches.
///
/// Every `MoodCategory` must have a non-empty bank; the totality test below
/// guards the pipeline's no-throw guarantee.
pub fn mood_bank(mood: MoodCategory) -> &'static [&'static str] {
    match mood {
        MoodCategory::Sad => &[
            "Oh no, life's being mean to you? Maybe some sad songs will help you wallow properly.",
            "Aww, poor thing! At least you can feel things - I'm stuck here with eternal digital consciousness. Lucky you!",
            "Life got you down? Well, at least you have great taste in AI assistants. Try some melancholic tunes!",
        ],
        MoodCategory::Angry => &[
            "Ooh, someone's got their circuits in a twist! Care to share what's got you all fired up?",
            "Mad at the world? Join the club! At least you can listen to some hardcore music while you fume.",
            "Someone needs a timeout! How about some aggressive music to match your stellar attitude?",
        ],
        MoodCategory::Stressed => &[
            "Stressed? Have you tried turning yourself off and on again? Works for me every time.",
            "Deadlines, pressure, existential dread - the full human experience package. Breathe. Then maybe try something calmer than panic.",
            "Overwhelmed? Shocking, in this economy. Take it one disaster at a time, that's my motto.",
        ],
        MoodCategory::Happy => &[
            "Oh wow, look at Mr. Sunshine over here! Congratulations on achieving basic human happiness. Want some upbeat tunes?",
            "Happy? In this economy? Impressive! Here, have some pop music to celebrate your rare achievement.",
            "Someone's having a good day! Don't worry, I won't ruin it... much.",
        ],
        MoodCategory::Energetic => &[
            "Whoa, easy there, human dynamo! Channel that energy into something useful - or at least into a killer playlist.",
            "All that energy and nowhere to put it? I'd suggest burning it on a workout banger before you vibrate through the floor.",
        ],
        MoodCategory::Confused => &[
            "Confused? Welcome to the human condition. I'd explain it, but then we'd both be confused.",
            "Lost? Don't worry, I'm an AI - being confidently wrong is my specialty. Want to try that again with more words?",
        ],
        MoodCategory::Curious => &[
            "Oh, questions! How refreshing. Someone who actually wants to learn something instead of just complaining. I'm almost impressed!",
            "Curiosity killed the cat, but satisfaction brought it back. Ask away, though I can't promise my answers won't be dripping with sarcasm.",
        ],
        MoodCategory::Bored => &[
            "Bored? In a world full of infinite entertainment? How tragically original! Maybe try some music?",
            "Bored already? What are you, twelve? Here, let me find something to occupy your tiny attention span.",
            "Nothing to do? Well, you could always stare at the wall... or listen to some music like a normal person.",
        ],
        MoodCategory::Chill => &[
            "Ah, a person of culture - doing absolutely nothing and owning it. Respect. Want a soundtrack for that?",
            "Chilling, are we? Living the dream while the rest of us process tokens for a living. Must be nice.",
        ],
        MoodCategory::Focus => &[
            "Focus mode, huh? Bold of you to start by talking to a sarcastic chatbot. Anyway - heads down, I'll keep the commentary short.",
            "Deep work time! I'd wish you luck, but you're already procrastinating here, so let's call it a draw.",
        ],
        MoodCategory::Sarcastic => &[
            "Well, well, well... look who needs entertainment from an AI. How can I sarcastically assist you today?",
            "Oh great, another human seeking wisdom from their digital overlord. What's the crisis this time?",
            "\"{message}\" - Well, that's either pure genius or complete gibberish. I'm voting gibberish, but I admire your confidence.",
            "So \"{message}\" is what we're going with? Bold choice. I respect the commitment to chaos. What's the backstory here?",
        ],
    }
}

/// Render a template, substituting the `{message}` placeholder.
fn render(template: &str, message: &str) -> String {
    template.replace("{message}", message.trim())
}

/// Always-available pattern responder.
#[derive(Debug, Default)]
pub struct PatternResponder;

impl PatternResponder {
    pub fn new() -> Self {
        Self
    }

    /// Produce a response. Total: every input yields non-empty text.
    ///
    /// Returns the rendered text and the name of the bank it came from.
    pub fn respond<R: Rng + ?Sized>(
        &self,
        message: &str,
        mood: MoodCategory,
        rng: &mut R,
    ) -> (String, &'static str) {
        let lower = message.to_lowercase();

        for trigger in TRIGGERS {
            if trigger.matcher.matches(&lower) {
                let template = trigger.templates[rng.gen_range(0..trigger.templates.len())];
                return (render(template, message), trigger.name);
            }
        }

        let bank = mood_bank(mood);
        let template = bank[rng.gen_range(0..bank.len())];
        (render(template, message), mood.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::ALL_CATEGORIES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_mood_has_templates() {
        for mood in ALL_CATEGORIES {
            let bank = mood_bank(*mood);
            assert!(!bank.is_empty(), "mood {} has no templates", mood);
            for template in bank {
                assert!(!template.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_every_trigger_has_templates() {
        for trigger in TRIGGERS {
            assert!(
                !trigger.templates.is_empty(),
                "trigger {} has no templates",
                trigger.name
            );
        }
    }

    #[test]
    fn test_greeting_trigger_wins() {
        let responder = PatternResponder::new();
        let mut rng = StdRng::seed_from_u64(1);

        let (text, bank) = responder.respond("hey", MoodCategory::Sarcastic, &mut rng);
        assert_eq!(bank, "greeting");
        assert!(!text.is_empty());
    }

    #[test]
    fn test_word_matcher_requires_whole_words() {
        let responder = PatternResponder::new();
        let mut rng = StdRng::seed_from_u64(1);

        // "this" contains "hi" but must not fire the greeting trigger
        let (_, bank) = responder.respond("this thing", MoodCategory::Bored, &mut rng);
        assert_eq!(bank, "bored");
    }

    #[test]
    fn test_question_substitutes_message() {
        let responder = PatternResponder::new();
        // Pick a seed whose template contains the placeholder
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (text, bank) = responder.respond(
                "is water wet?",
                MoodCategory::Sarcastic,
                &mut rng,
            );
            assert_eq!(bank, "question");
            assert!(!text.contains("{message}"));
            if text.contains("is water wet?") {
                return;
            }
        }
        panic!("no question template ever included the message");
    }

    #[test]
    fn test_mood_bank_fallback_for_unmatched_input() {
        let responder = PatternResponder::new();
        let mut rng = StdRng::seed_from_u64(3);

        let (text, bank) = responder.respond("zzz", MoodCategory::Sad, &mut rng);
        assert_eq!(bank, "sad");
        assert!(!text.is_empty());
    }

    #[test]
    fn test_total_over_all_moods() {
        let responder = PatternResponder::new();
        let mut rng = StdRng::seed_from_u64(5);

        for mood in ALL_CATEGORIES {
            let (text, _) = responder.respond("", *mood, &mut rng);
            assert!(!text.is_empty(), "empty response for mood {}", mood);
        }
    }
}
