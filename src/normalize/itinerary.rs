use serde_json::Value;

use super::aliases::Field;
use super::fields::{self, Object};
use super::unwrap_trip;
use crate::models::{Activity, ItineraryDay};

/// Itinerary days in day order.
///
/// Accepts a day array, an object keyed by day label, or a single day object
/// carrying an activity list, optionally under an `itinerary` key.
#[must_use]
pub fn normalize_itinerary(value: &Value) -> Vec<ItineraryDay> {
    let value = unwrap_trip(value);
    let container = value
        .as_object()
        .and_then(|obj| {
            fields::candidates(obj, Field::Itinerary).find(|v| v.is_array() || v.is_object())
        })
        .unwrap_or(value);

    match container {
        Value::Array(days) => days
            .iter()
            .filter(|day| !day.is_null())
            .enumerate()
            .map(|(i, day)| self::day(day, None, i + 1))
            .collect(),
        Value::Object(obj) if fields::array(obj, Field::Activities).is_some() => {
            vec![self::day(container, None, 1)]
        }
        Value::Object(obj) => {
            let mut entries: Vec<(&String, &Value)> = obj
                .iter()
                .filter(|(_, day)| day.is_object() || day.is_array())
                .collect();
            // Once any key is numbered, unnumbered siblings are notes, not days
            if entries.iter().any(|(key, _)| fields::day_number(key).is_some()) {
                entries.retain(|(key, _)| fields::day_number(key).is_some());
            }
            entries.sort_by(|(a, _), (b, _)| fields::day_order(a, b));
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (key, day))| self::day(day, Some(key.as_str()), i + 1))
                .collect()
        }
        _ => Vec::new(),
    }
}

fn day(value: &Value, key: Option<&str>, number: usize) -> ItineraryDay {
    let fallback = || key.map_or_else(|| format!("Day {number}"), str::to_string);
    match value {
        Value::Object(obj) => ItineraryDay {
            day: fields::optional_text(obj, Field::DayLabel)
                .map(|label| match label.parse::<u64>() {
                    Ok(n) => format!("Day {n}"),
                    Err(_) => label,
                })
                .unwrap_or_else(fallback),
            date: fields::optional_text(obj, Field::DayDate),
            activities: fields::array(obj, Field::Activities)
                .map(|items| activities(items))
                .unwrap_or_default(),
        },
        Value::Array(items) => ItineraryDay::new(fallback(), activities(items)),
        _ => ItineraryDay::new(fallback(), Vec::new()),
    }
}

fn activities(items: &[Value]) -> Vec<Activity> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(activity(obj)),
            Value::String(name) if !name.trim().is_empty() => Some(Activity::named(name.trim())),
            _ => None,
        })
        .collect()
}

fn activity(obj: &Object) -> Activity {
    Activity {
        place_name: fields::text(obj, Field::PlaceName),
        place_details: fields::text(obj, Field::PlaceDetails),
        image_url: fields::text(obj, Field::PlaceImageUrl),
        geo: fields::geo(obj),
        ticket_pricing: fields::text(obj, Field::TicketPricing),
        travel_time: fields::text(obj, Field::TravelTime),
        how_to_travel: fields::text(obj, Field::HowToTravel),
        best_time_to_visit: fields::text(obj, Field::BestTimeToVisit),
        event_date: fields::optional_text(obj, Field::EventDate),
    }
}
