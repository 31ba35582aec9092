//! Shopping recommendations

use serde::{Deserialize, Serialize};

use super::geo::GeoCoordinates;

/// Used instead of a blank nearest-location label
pub const NEAREST_LOCATION_PLACEHOLDER: &str = "No nearest location specified";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShoppingSpot {
    #[serde(rename = "PlaceName")]
    pub place_name: String,
    #[serde(rename = "PlaceDetails")]
    pub place_details: String,
    #[serde(rename = "PlaceImageURL")]
    pub image_url: String,
    #[serde(rename = "GeoCoordinates", default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(rename = "RecommendedDay")]
    pub recommended_day: String,
    #[serde(rename = "NearestItineraryLocation")]
    pub nearest_itinerary_location: String,
}

impl Default for ShoppingSpot {
    fn default() -> Self {
        Self {
            place_name: String::new(),
            place_details: String::new(),
            image_url: String::new(),
            geo: None,
            recommended_day: String::new(),
            nearest_itinerary_location: NEAREST_LOCATION_PLACEHOLDER.to_string(),
        }
    }
}
