//! Flight options

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Flight {
    #[serde(rename = "AirlineName")]
    pub airline_name: String,
    #[serde(rename = "FlightNumber")]
    pub flight_number: String,
    #[serde(rename = "DepartureAirport")]
    pub departure_airport: String,
    #[serde(rename = "DepartureTime")]
    pub departure_time: String,
    #[serde(rename = "ArrivalAirport")]
    pub arrival_airport: String,
    #[serde(rename = "ArrivalTime")]
    pub arrival_time: String,
    #[serde(rename = "FlightDuration")]
    pub flight_duration: String,
    #[serde(rename = "Price")]
    pub price: String,
    /// Absolute booking link; empty when the model gave none
    #[serde(rename = "BookingURL")]
    pub booking_url: String,
}

/// Prefix scheme-less booking links with `https://`
#[must_use]
pub fn absolute_booking_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
