use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Built-in preference label -> category tags mapping.
const DEFAULT_PREFERENCES: &[(&str, &[&str])] = &[
    ("Historical Sites", &["historical_place", "museum"]),
    ("Parks", &["park", "zoo"]),
    ("Museums", &["museum"]),
    ("Shopping", &["shopping_mall", "store"]),
    ("Famous Attractions", &["tourist_attraction"]),
    ("Cafes", &["cafe"]),
    ("Hidden Gems", &["point_of_interest"]),
    ("Nature", &["natural_feature"]),
    ("Famous Street Foods", &["restaurant", "food"]),
    ("Famous Restaurants", &["restaurant"]),
    ("Heritage Sites", &["historical_place"]),
    ("Culture", &["cultural_center"]),
    ("Adventure Activities", &["amusement_park"]),
    (
        "Sports",
        &[
            "cricket_stadium",
            "swimming_pool",
            "outdoor_swimming_pool",
            "sports_complex",
            "tennis_court",
            "soccer_field",
            "futsal_court",
        ],
    ),
    (
        "Entertainment",
        &["amusement_park", "movie_theater", "shopping_mall", "video_game_store"],
    ),
    ("Nightlife", &["pub", "bar", "night_club"]),
    ("Yoga & Wellness", &["spa", "gym", "massage"]),
];

/// Immutable mapping from a human-readable preference label to category tags.
///
/// Loaded once at startup and shared behind an `Arc`. Tags are stored
/// lowercase so matching against provider categories is case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceTable {
    labels: HashMap<String, HashSet<String>>,
}

impl Default for PreferenceTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_PREFERENCES.iter().map(|(label, tags)| {
            let tags = tags.iter().map(|t| t.to_string()).collect::<Vec<_>>();
            (label.to_string(), tags)
        }))
    }
}

#[derive(Deserialize)]
#[serde(transparent)]
struct PreferenceFile(BTreeMap<String, Vec<String>>);

impl PreferenceTable {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let labels = pairs
            .into_iter()
            .map(|(label, tags)| {
                let tags = tags.into_iter().map(|t| t.to_lowercase()).collect();
                (label, tags)
            })
            .collect();

        PreferenceTable { labels }
    }

    /// Parse a JSON object of `{"Label": ["tag", ...]}`.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: PreferenceFile = serde_json::from_str(json)
            .map_err(|e| format!("Invalid preference table: {}", e))?;

        if file.0.is_empty() {
            return Err("Preference table must define at least one label".to_string());
        }

        Ok(Self::from_pairs(file.0))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    /// Union of the category tags for `labels`. Unknown labels contribute nothing.
    pub fn categories_for<S: AsRef<str>>(&self, labels: &[S]) -> HashSet<String> {
        let mut union = HashSet::new();
        for label in labels {
            match self.labels.get(label.as_ref()) {
                Some(tags) => union.extend(tags.iter().cloned()),
                None => tracing::debug!(label = label.as_ref(), "Unknown preference label ignored"),
            }
        }
        union
    }

    /// Known labels, sorted for stable presentation.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.labels.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
