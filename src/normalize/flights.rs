use serde_json::Value;

use super::aliases::Field;
use super::fields::{self, Object};
use super::{DEFAULT_CURRENCY, unwrap_trip};
use crate::models::flight::absolute_booking_url;
use crate::models::{Flight, PRICE_PLACEHOLDER};

/// Flight options from a bare array or the array under `flights`
#[must_use]
pub fn normalize_flights(value: &Value) -> Vec<Flight> {
    let items = match unwrap_trip(value) {
        Value::Array(items) => Some(items),
        Value::Object(obj) => fields::array(obj, Field::Flights),
        _ => None,
    };

    items
        .map(|items| items.iter().filter_map(Value::as_object).map(flight).collect())
        .unwrap_or_default()
}

fn flight(obj: &Object) -> Flight {
    Flight {
        airline_name: fields::text(obj, Field::AirlineName),
        flight_number: fields::text(obj, Field::FlightNumber),
        departure_airport: fields::text(obj, Field::DepartureAirport),
        departure_time: fields::text(obj, Field::DepartureTime),
        arrival_airport: fields::text(obj, Field::ArrivalAirport),
        arrival_time: fields::text(obj, Field::ArrivalTime),
        flight_duration: fields::text(obj, Field::FlightDuration),
        price: fields::price(obj, Field::Price, DEFAULT_CURRENCY)
            .unwrap_or_else(|| PRICE_PLACEHOLDER.to_string()),
        booking_url: absolute_booking_url(&fields::text(obj, Field::BookingUrl)),
    }
}
