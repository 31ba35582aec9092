//! Hotel model

use serde::{Deserialize, Serialize};

use super::budget::parse_amount;
use super::geo::GeoCoordinates;

/// Shown when the model gave no usable price
pub const PRICE_PLACEHOLDER: &str = "Price Not Specified";

/// A hotel option suggested for the trip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hotel {
    #[serde(rename = "HotelName")]
    pub name: String,
    #[serde(rename = "HotelAddress")]
    pub address: String,
    /// Always non-empty; numeric source prices carry a currency suffix
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "HotelImageURL")]
    pub image_url: String,
    #[serde(rename = "GeoCoordinates", default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Default for Hotel {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            price: PRICE_PLACEHOLDER.to_string(),
            image_url: String::new(),
            geo: None,
            rating: String::new(),
            description: String::new(),
        }
    }
}

impl Hotel {
    /// Numeric nightly price, if one can be read from the price text
    #[must_use]
    pub fn price_amount(&self) -> Option<f64> {
        parse_amount(&self.price)
    }
}

/// Keep hotels whose price sits within 80–120 % of half the user's budget.
///
/// Hotels without a readable price are dropped.
#[must_use]
pub fn hotels_within_budget(hotels: &[Hotel], user_budget: f64) -> Vec<Hotel> {
    let half = user_budget / 2.0;
    let (low, high) = (half * 0.8, half * 1.2);
    hotels
        .iter()
        .filter(|hotel| {
            hotel
                .price_amount()
                .is_some_and(|price| price >= low && price <= high)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(name: &str, price: &str) -> Hotel {
        Hotel {
            name: name.to_string(),
            price: price.to_string(),
            ..Hotel::default()
        }
    }

    #[test]
    fn test_default_price_is_placeholder() {
        let hotel = Hotel::default();
        assert_eq!(hotel.price, PRICE_PLACEHOLDER);
        assert!(hotel.price_amount().is_none());
    }

    #[test]
    fn test_hotels_within_budget() {
        let hotels = vec![
            hotel("Cheap", "2000 INR"),
            hotel("Fits", "5,000 INR"),
            hotel("Edge", "₹6000 per night"),
            hotel("Pricey", "9000 INR"),
            hotel("Unknown", PRICE_PLACEHOLDER),
        ];

        let names: Vec<String> = hotels_within_budget(&hotels, 10000.0)
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Fits", "Edge"]);
    }

    #[test]
    fn test_serializes_pascal_case() {
        let value = serde_json::to_value(hotel("Inn", "500 INR")).unwrap();
        assert_eq!(value["HotelName"], "Inn");
        assert_eq!(value["Price"], "500 INR");
        assert!(value.get("GeoCoordinates").is_none());
    }
}
