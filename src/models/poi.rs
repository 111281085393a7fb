use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate point of interest returned by the place search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poi {
    /// Provider place id, unique within a search result
    pub id: String,
    pub name: String,
    pub address: String,
    /// Provider rating; 0.0 when the place has none
    pub rating: f64,
    /// Category tags as reported by the provider (e.g. "museum", "park")
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
}

impl Poi {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: f64) -> Self {
        Poi {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            rating,
            categories: Vec::new(),
            photo_reference: None,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_photo_reference(mut self, reference: impl Into<String>) -> Self {
        self.photo_reference = Some(reference.into());
        self
    }

    /// True when any of this POI's categories (case-insensitive) is in `wanted`.
    /// `wanted` must hold lowercase tags.
    pub fn matches_any_category(&self, wanted: &HashSet<String>) -> bool {
        self.categories
            .iter()
            .any(|c| wanted.contains(&c.to_lowercase()))
    }
}

/// Drop the city's own listing and repeated place ids (first occurrence wins).
pub fn exclude_city_and_duplicates(pois: Vec<Poi>, city: &str) -> Vec<Poi> {
    let city = city.trim().to_lowercase();
    let mut seen_ids = HashSet::new();

    pois.into_iter()
        .filter(|poi| poi.name.to_lowercase() != city)
        .filter(|poi| seen_ids.insert(poi.id.clone()))
        .collect()
}
