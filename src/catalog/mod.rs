//! Song catalog and mood-based song matching.
//!
//! The catalog is loaded once from a JSON file at startup and treated as
//! read-only for the life of the process. Matching maps a mood category to a
//! set of catalog mood tags, filters, then shuffles with a caller-supplied
//! RNG so tests can pin the selection with a seed.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::mood::MoodCategory;

/// A single catalog entry.
///
/// Field names follow the frontend contract, so `youtubeUrl` stays camelCase
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Unique catalog id
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Catalog mood tag (looser than `MoodCategory`, e.g. "Relaxed")
    pub mood: String,
    pub duration: String,
    #[serde(rename = "youtubeUrl")]
    pub youtube_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Catalog tags considered when a mood has no better mapping.
pub const DEFAULT_TAGS: &[&str] = &["Happy", "Energetic"];

/// Catalog mood tags accepted for a mood category.
///
/// The sarcastic fallback mood gets the default set; everything else maps to
/// the tags whose songs fit the mood's energy.
pub fn catalog_tags(mood: MoodCategory) -> &'static [&'static str] {
    match mood {
        MoodCategory::Sad => &["Sad"],
        MoodCategory::Angry => &["Angry", "Energetic"],
        MoodCategory::Stressed => &["Relaxed", "Chill"],
        MoodCategory::Happy => &["Happy", "Energetic"],
        MoodCategory::Energetic => &["Energetic"],
        MoodCategory::Confused => &["Chill"],
        MoodCategory::Curious => &["Focus", "Chill"],
        MoodCategory::Bored => &["Chill", "Relaxed"],
        MoodCategory::Chill => &["Chill", "Relaxed"],
        MoodCategory::Focus => &["Focus"],
        MoodCategory::Sarcastic => DEFAULT_TAGS,
    }
}

/// Read-only song catalog, loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct SongCatalog {
    songs: Vec<Song>,
}

impl SongCatalog {
    /// Create an empty catalog
    pub fn empty() -> Self {
        Self { songs: Vec::new() }
    }

    /// Create a catalog from in-memory songs (tests, fixtures)
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Load the catalog from a JSON file.
    ///
    /// A missing or unreadable file yields an empty catalog with a warning;
    /// an empty catalog is a valid degenerate state and must not abort
    /// startup.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Song catalog not readable, starting empty");
                return Self::empty();
            }
        };

        match serde_json::from_str::<Vec<Song>>(&raw) {
            Ok(songs) => {
                info!(path = %path.display(), count = songs.len(), "Song catalog loaded");
                Self { songs }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Song catalog malformed, starting empty");
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All songs in catalog order
    pub fn all(&self) -> &[Song] {
        &self.songs
    }

    /// Look up a song by id
    pub fn by_id(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    /// Pick up to `n` songs matching a mood category.
    ///
    /// Filters the catalog to the mapped tag set, shuffles uniformly with
    /// the supplied RNG and takes the first `n`. Returns fewer than `n`
    /// (possibly zero) when the catalog has fewer matches; never errors.
    pub fn pick_for_mood<R: Rng + ?Sized>(
        &self,
        mood: MoodCategory,
        n: usize,
        rng: &mut R,
    ) -> Vec<Song> {
        let tags = catalog_tags(mood);
        self.pick_matching(n, rng, |song| {
            tags.iter().any(|t| song.mood.eq_ignore_ascii_case(t))
        })
    }

    /// Pick up to `n` songs carrying a specific catalog tag.
    pub fn pick_for_tag<R: Rng + ?Sized>(&self, tag: &str, n: usize, rng: &mut R) -> Vec<Song> {
        self.pick_matching(n, rng, |song| song.mood.eq_ignore_ascii_case(tag))
    }

    fn pick_matching<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
        predicate: impl Fn(&Song) -> bool,
    ) -> Vec<Song> {
        let mut matches: Vec<&Song> = self.songs.iter().filter(|s| predicate(*s)).collect();
        matches.shuffle(rng);
        matches.into_iter().take(n).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn song(id: &str, mood: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            mood: mood.to_string(),
            duration: "3:30".to_string(),
            youtube_url: format!("https://youtube.com/watch?v={}", id),
            thumbnail: None,
        }
    }

    fn test_catalog() -> SongCatalog {
        SongCatalog::from_songs(vec![
            song("s1", "Sad"),
            song("s2", "Happy"),
            song("s3", "Energetic"),
            song("s4", "Chill"),
            song("s5", "Relaxed"),
            song("s6", "Chill"),
        ])
    }

    #[test]
    fn test_pick_respects_tag_mapping() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = catalog.pick_for_mood(MoodCategory::Bored, 10, &mut rng);
        // Bored maps to Chill + Relaxed: s4, s5, s6
        assert_eq!(picks.len(), 3);
        for pick in &picks {
            assert!(pick.mood == "Chill" || pick.mood == "Relaxed");
        }
    }

    #[test]
    fn test_pick_clamps_to_match_count() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        // Only one Sad song, asking for five
        let picks = catalog.pick_for_mood(MoodCategory::Sad, 5, &mut rng);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "s1");
    }

    #[test]
    fn test_pick_no_duplicates() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(42);

        let picks = catalog.pick_for_mood(MoodCategory::Chill, 100, &mut rng);
        let mut ids: Vec<&str> = picks.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), picks.len());
    }

    #[test]
    fn test_pick_zero_and_empty() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(catalog
            .pick_for_mood(MoodCategory::Happy, 0, &mut rng)
            .is_empty());

        let empty = SongCatalog::empty();
        assert!(empty
            .pick_for_mood(MoodCategory::Happy, 3, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_pick_deterministic_under_seed() {
        let catalog = test_catalog();

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        let a = catalog.pick_for_mood(MoodCategory::Chill, 2, &mut rng_a);
        let b = catalog.pick_for_mood(MoodCategory::Chill, 2, &mut rng_b);

        let ids_a: Vec<&str> = a.iter().map(|s| s.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_sarcastic_uses_default_tags() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = catalog.pick_for_mood(MoodCategory::Sarcastic, 10, &mut rng);
        // Default tags are Happy + Energetic: s2, s3
        assert_eq!(picks.len(), 2);
        for pick in &picks {
            assert!(pick.mood == "Happy" || pick.mood == "Energetic");
        }
    }

    #[test]
    fn test_pick_for_tag_case_insensitive() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = catalog.pick_for_tag("chill", 10, &mut rng);
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let catalog = SongCatalog::load("/nonexistent/songs.json");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_song_wire_format() {
        let s = song("s1", "Sad");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("youtubeUrl"));
        assert!(!json.contains("thumbnail"));

        let decoded: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, "s1");
    }
}
