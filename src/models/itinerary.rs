//! Itinerary days and activities

use serde::{Deserialize, Serialize};

use super::geo::GeoCoordinates;

/// One stop on an itinerary day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Activity {
    #[serde(rename = "PlaceName")]
    pub place_name: String,
    #[serde(rename = "PlaceDetails")]
    pub place_details: String,
    #[serde(rename = "PlaceImageURL")]
    pub image_url: String,
    /// Unset when the model gave no usable coordinates
    #[serde(rename = "GeoCoordinates", default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(rename = "TicketPricing")]
    pub ticket_pricing: String,
    #[serde(rename = "TravelTime")]
    pub travel_time: String,
    /// Mode of travel from the previous stop, e.g. "Taxi from hotel"
    #[serde(rename = "HowToTravel")]
    pub how_to_travel: String,
    #[serde(rename = "BestTimeToVisit")]
    pub best_time_to_visit: String,
    /// Set when the activity was added to an existing trip for a specific date
    #[serde(rename = "EventDate", default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
}

impl Activity {
    #[must_use]
    pub fn named(place_name: impl Into<String>) -> Self {
        Self {
            place_name: place_name.into(),
            ..Self::default()
        }
    }
}

/// A single day of the itinerary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ItineraryDay {
    #[serde(rename = "Day")]
    pub day: String,
    /// Calendar date (`YYYY-MM-DD`) once a start date is known
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "Activities", default)]
    pub activities: Vec<Activity>,
}

impl ItineraryDay {
    #[must_use]
    pub fn new(day: impl Into<String>, activities: Vec<Activity>) -> Self {
        Self {
            day: day.into(),
            date: None,
            activities,
        }
    }

    /// Short description used when feeding the itinerary back into prompts
    #[must_use]
    pub fn digest(&self) -> String {
        let places: Vec<&str> = self
            .activities
            .iter()
            .map(|a| a.place_name.as_str())
            .collect();
        let details: Vec<&str> = self
            .activities
            .iter()
            .map(|a| a.place_details.as_str())
            .collect();
        format!("Visit {} ({})", places.join(", "), details.join("; "))
    }
}
