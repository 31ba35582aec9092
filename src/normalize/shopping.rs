use serde_json::Value;

use super::aliases::Field;
use super::fields::{self, Object};
use super::unwrap_trip;
use crate::models::{NEAREST_LOCATION_PLACEHOLDER, ShoppingSpot};

/// Shopping spots from `ShoppingSpots`, possibly inside a `shoppingList` wrapper
#[must_use]
pub fn normalize_shopping(value: &Value) -> Vec<ShoppingSpot> {
    let items = match unwrap_trip(value) {
        Value::Array(items) => Some(items),
        Value::Object(obj) => {
            let list = fields::object(obj, Field::ShoppingList).unwrap_or(obj);
            fields::array(list, Field::ShoppingSpots)
                .or_else(|| fields::array(obj, Field::ShoppingList))
        }
        _ => None,
    };

    items
        .map(|items| items.iter().filter_map(Value::as_object).map(spot).collect())
        .unwrap_or_default()
}

fn spot(obj: &Object) -> ShoppingSpot {
    ShoppingSpot {
        place_name: fields::text(obj, Field::PlaceName),
        place_details: fields::text(obj, Field::PlaceDetails),
        image_url: fields::text(obj, Field::PlaceImageUrl),
        geo: fields::geo(obj),
        recommended_day: fields::text(obj, Field::RecommendedDay),
        nearest_itinerary_location: fields::optional_text(obj, Field::NearestItineraryLocation)
            .unwrap_or_else(|| NEAREST_LOCATION_PLACEHOLDER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoCoordinates;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_wrapped_spots() {
        let value = json!({
            "shoppingList": {
                "ShoppingSpots": [
                    {
                        "PlaceName": "Johari Bazaar",
                        "PlaceDetails": "Jewellery and textiles",
                        "PlaceImageURL": "https://img.example/johari.jpg",
                        "GeoCoordinates": {"latitude": 26.9196, "longitude": 75.8267},
                        "RecommendedDay": "Day 2",
                        "NearestItineraryLocation": "Hawa Mahal"
                    },
                    {"PlaceName": "Bapu Bazaar", "NearestItineraryLocation": "  "}
                ]
            }
        });
        let spots = normalize_shopping(&value);
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].nearest_itinerary_location, "Hawa Mahal");
        assert_eq!(spots[0].geo, GeoCoordinates::new(26.9196, 75.8267));
        assert_eq!(spots[1].nearest_itinerary_location, NEAREST_LOCATION_PLACEHOLDER);
        assert_eq!(spots[1].geo, None);
    }

    #[test]
    fn test_unwrapped_spots() {
        let spots = normalize_shopping(&json!({"ShoppingSpots": [{"PlaceName": "Mall Road"}]}));
        assert_eq!(spots[0].place_name, "Mall Road");
        assert_eq!(spots[0].recommended_day, "");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!([]))]
    #[case(json!({"shoppingList": {}}))]
    #[case(json!({"ShoppingSpots": "none"}))]
    fn test_empty_inputs(#[case] input: Value) {
        assert!(normalize_shopping(&input).is_empty());
    }
}
