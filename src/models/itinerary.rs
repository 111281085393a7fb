use crate::error::{AppError, Result};
use crate::models::Poi;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::macros::format_description;
use time::Time;

/// Daily sightseeing window, `[start, end)` as times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Time,
    pub end: Time,
}

impl TimeWindow {
    pub fn new(start: Time, end: Time) -> Result<Self> {
        if end <= start {
            return Err(AppError::InvalidWindow(format!(
                "endTime {} must be after startTime {}",
                format_hm(end),
                format_hm(start)
            )));
        }
        Ok(TimeWindow { start, end })
    }

    /// Parse `"HH:MM"` start and end times (24-hour clock).
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_hm(start)?, parse_hm(end)?)
    }

    pub fn total_minutes(&self) -> u32 {
        minute_of_day(self.end) - minute_of_day(self.start)
    }
}

/// One stop's share of the day window, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: Time,
    pub end: Time,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_hm(self.start), format_hm(self.end))
    }
}

fn parse_hm(value: &str) -> Result<Time> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| AppError::InvalidWindow(format!("'{}' is not a valid HH:MM time", value)))
}

pub(crate) fn minute_of_day(t: Time) -> u32 {
    t.hour() as u32 * 60 + t.minute() as u32
}

fn format_hm(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

// Request/Response types for API endpoints

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub city: String,
    pub days: u32,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl ItineraryRequest {
    /// Check request fields and return the parsed daily window.
    pub fn validate(&self) -> Result<TimeWindow> {
        if self.city.trim().is_empty() {
            return Err(AppError::InvalidRequest("city must not be empty".to_string()));
        }
        if self.days == 0 {
            return Err(AppError::InvalidRequest(
                "days must be at least 1".to_string(),
            ));
        }
        TimeWindow::parse(&self.start_time, &self.end_time)
    }
}

/// One scheduled visit in the final itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryStop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub categories: Vec<String>,
    /// 1-based day index
    pub day: u32,
    /// `HH:MM-HH:MM`
    pub time_slot: String,
    pub photo_url: Option<String>,
}

impl ItineraryStop {
    pub fn new(poi: &Poi, day: u32, slot: TimeSlot, photo_url: Option<String>) -> Self {
        ItineraryStop {
            id: poi.id.clone(),
            name: poi.name.clone(),
            address: poi.address.clone(),
            rating: poi.rating,
            categories: poi.categories.clone(),
            day,
            time_slot: slot.to_string(),
            photo_url,
        }
    }
}
