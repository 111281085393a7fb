use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementStatus {
    Ok,
    Unavailable,
}

/// One origin -> destination cell of a distance query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceElement {
    pub distance_meters: f64,
    pub status: ElementStatus,
}

impl DistanceElement {
    pub fn ok(distance_meters: f64) -> Self {
        DistanceElement {
            distance_meters,
            status: ElementStatus::Ok,
        }
    }

    pub fn unavailable() -> Self {
        DistanceElement {
            distance_meters: f64::INFINITY,
            status: ElementStatus::Unavailable,
        }
    }

    /// Distance usable by the planner; infinite unless the element is OK
    pub fn effective_meters(&self) -> f64 {
        match self.status {
            ElementStatus::Ok if self.distance_meters.is_finite() => self.distance_meters,
            _ => f64::INFINITY,
        }
    }
}

/// One provider row: elements positionally aligned with the requested destinations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceRow {
    pub elements: Vec<DistanceElement>,
}

impl DistanceRow {
    pub fn new(elements: Vec<DistanceElement>) -> Self {
        DistanceRow { elements }
    }
}

/// Sparse origin-indexed map of destination distances, possibly incomplete.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    rows: HashMap<String, HashMap<String, DistanceElement>>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge destination elements for `origin`. Later merges for the same
    /// (origin, destination) pair overwrite earlier ones.
    pub fn merge_row<I>(&mut self, origin: &str, elements: I)
    where
        I: IntoIterator<Item = (String, DistanceElement)>,
    {
        self.rows
            .entry(origin.to_string())
            .or_default()
            .extend(elements);
    }

    pub fn get(&self, origin: &str, destination: &str) -> Option<&DistanceElement> {
        self.rows.get(origin).and_then(|row| row.get(destination))
    }

    /// Missing and unavailable pairs are infinitely far away.
    pub fn distance(&self, origin: &str, destination: &str) -> f64 {
        self.get(origin, destination)
            .map(DistanceElement::effective_meters)
            .unwrap_or(f64::INFINITY)
    }

    pub fn origin_count(&self) -> usize {
        self.rows.len()
    }

    /// Total (origin, destination) cells stored, OK or not
    pub fn element_count(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
