use serde_json::Value;

use super::aliases::{Field, keys};
use super::fields::{self, Object};
use super::{DEFAULT_CURRENCY, unwrap_trip};
use crate::models::{Hotel, PRICE_PLACEHOLDER};

const HOTEL_FIELDS: [Field; 6] = [
    Field::HotelName,
    Field::HotelAddress,
    Field::Price,
    Field::HotelImageUrl,
    Field::Rating,
    Field::Description,
];

/// Hotels from a hotel-list response.
///
/// Confirmed hotel keys win over budget-constrained ones. A bare array or a
/// single hotel-shaped object is accepted too.
#[must_use]
pub fn normalize_hotels(value: &Value) -> Vec<Hotel> {
    let value = unwrap_trip(value);
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => {
            match fields::array(obj, Field::ConfirmedHotels)
                .or_else(|| fields::array(obj, Field::BudgetHotels))
            {
                Some(items) => items.iter().collect(),
                None if looks_like_hotel(obj) => vec![value],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(Value::as_object)
        .map(hotel)
        .collect()
}

fn looks_like_hotel(obj: &Object) -> bool {
    HOTEL_FIELDS
        .iter()
        .flat_map(|field| keys(*field))
        .any(|key| obj.contains_key(*key))
}

fn hotel(obj: &Object) -> Hotel {
    Hotel {
        name: fields::text(obj, Field::HotelName),
        address: fields::text(obj, Field::HotelAddress),
        price: fields::price(obj, Field::Price, DEFAULT_CURRENCY)
            .unwrap_or_else(|| PRICE_PLACEHOLDER.to_string()),
        image_url: fields::text(obj, Field::HotelImageUrl),
        geo: fields::geo(obj),
        rating: fields::text(obj, Field::Rating),
        description: fields::text(obj, Field::Description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoCoordinates;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_single_loose_hotel() {
        let hotels = normalize_hotels(&json!({"name": "Inn", "price": 500}));
        assert_eq!(
            hotels,
            vec![Hotel {
                name: "Inn".to_string(),
                price: "500 INR".to_string(),
                ..Hotel::default()
            }]
        );
    }

    #[test]
    fn test_confirmed_hotels_win_over_budget_hotels() {
        let value = json!({
            "budgetHotels": [{"HotelName": "Budget Stay"}],
            "hotels": [{"HotelName": "Grand"}, {"HotelName": "Palace"}]
        });
        let names: Vec<String> = normalize_hotels(&value).into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Grand", "Palace"]);
    }

    #[test]
    fn test_budget_hotels_inside_trip_wrapper() {
        let value = json!({
            "trip": {"hotelsWithinBudget": [{"HotelName": "Budget Stay", "Price": " 3,000 INR "}]}
        });
        let hotels = normalize_hotels(&value);
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].price, "3,000 INR");
    }

    #[rstest]
    #[case(json!({"HotelName": "A", "Price": ""}), PRICE_PLACEHOLDER)]
    #[case(json!({"HotelName": "A", "Price": null}), PRICE_PLACEHOLDER)]
    #[case(json!({"HotelName": "A", "Price": {"min": 1}}), PRICE_PLACEHOLDER)]
    #[case(json!({"HotelName": "A"}), PRICE_PLACEHOLDER)]
    #[case(json!({"HotelName": "A", "Price": 1250.5}), "1250.5 INR")]
    #[case(json!({"HotelName": "A", "pricePerNight": "₹4000"}), "₹4000")]
    fn test_price_rules(#[case] input: Value, #[case] expected: &str) {
        let hotels = normalize_hotels(&json!([input]));
        assert_eq!(hotels[0].price, expected);
    }

    #[test]
    fn test_canonical_hotel_round_trips() {
        let canonical = json!({
            "HotelName": "Taj Lake Palace",
            "HotelAddress": "Pichola, Udaipur",
            "Price": "25000 INR",
            "HotelImageURL": "https://img.example/taj.jpg",
            "GeoCoordinates": {"latitude": 24.5754, "longitude": 73.68},
            "Rating": "4.8",
            "Description": "Marble palace on the lake"
        });
        let hotels = normalize_hotels(&json!({"hotels": [canonical.clone()]}));
        assert_eq!(serde_json::to_value(&hotels[0]).unwrap(), canonical);
        assert_eq!(hotels[0].geo, GeoCoordinates::new(24.5754, 73.68));
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!({}))]
    #[case(json!(null))]
    #[case(json!("hotels"))]
    #[case(json!({"Notes": "nothing useful"}))]
    fn test_empty_inputs(#[case] input: Value) {
        assert!(normalize_hotels(&input).is_empty());
    }

    #[test]
    fn test_non_object_items_are_skipped() {
        let hotels = normalize_hotels(&json!([null, "Grand", {"HotelName": "Palace"}]));
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Palace");
    }
}
