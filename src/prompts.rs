//! Prompt templates for each record kind
//!
//! Templates use `{placeholder}` markers filled from a [`TripRequest`] and the
//! current [`TripContext`]. Each one asks for the JSON shape the normalizer
//! expects, though the normalizer does not rely on the model following it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::TripContext;
use crate::error::TripError;
use crate::models::ItineraryDay;
use crate::normalize::RecordKind;

/// Longest trip the planner accepts, in days
pub const MAX_DAYS: u32 = 15;

pub const HOTELS_PROMPT: &str = "Generate a list of hotels for a {people} in {location} on a {budget} budget. Provide the following details for each hotel: HotelName, HotelAddress, Price, HotelImageURL from Google images, GeoCoordinates, Rating, and Description. Present this information in JSON format.";

pub const ITINERARY_PROMPT: &str = "Generate a {noOfDays}-days travel itinerary for a {people} in {location} on a {budget} budget, starting on {startDate} from the hotel {HotelName} at GeoCoordinates {startingGeoCoordinates}.{specificPlace} Suggest an itinerary with activities ordered logically based on proximity and travel efficiency, starting with locations closest to the hotel and progressing outward or in a practical travel sequence. For each activity, include: PlaceName, PlaceDetails, PlaceImageURL, GeoCoordinates, TicketPricing, TravelTime from the previous location (or hotel for the first activity), BestTimeToVisit, and HowToTravel (suggest a mode of transportation such as train, bus, local vehicle, car, or plane, explicitly stating the starting point, e.g., 'Taxi from hotel' for the first activity or 'Bus from [previous PlaceName]' for subsequent activities, considering distance, budget, and practicality). Present this information in JSON format as an \"itinerary\" array of days, each with Day and Activities.";

pub const BUDGET_PROMPT: &str = "Estimate the budget for a {noOfDays}-days trip for a {people} in {location} on a {budget} budget, excluding flights. The planned itinerary is: {itineraryActivities}. Provide ApproximateTotalBudget, HotelCost and ActivitiesAndTransportCost as numbers in INR. Present this information in JSON format.";

pub const FLIGHTS_PROMPT: &str = "Suggest flights for a {people} from {fromLocation} to {toLocation} on {date} on a {budget} budget. For each flight provide: AirlineName, FlightNumber, DepartureAirport, DepartureTime, ArrivalAirport, ArrivalTime, FlightDuration, Price, and BookingURL. Present this information in JSON format as a \"flights\" array.";

pub const PACKING_PROMPT: &str = "Create a day-by-day packing list for a {noOfDays}-days trip to {location} starting on {startDate} in {season}. The planned activities are: {itineraryActivities}. For each day use the key \"Day N\" and provide Clothing, Cosmetics, and OtherEssentials as arrays of strings. Present this information in JSON format.";

pub const SHOPPING_PROMPT: &str = "Recommend shopping spots in {location} for a {noOfDays}-days trip starting on {startDate} in {season} on a {budget} budget. The planned activities are: {itineraryActivities}. For each spot provide: PlaceName, PlaceDetails, PlaceImageURL, GeoCoordinates, RecommendedDay, and NearestItineraryLocation. Present this information in JSON format as a \"ShoppingSpots\" array.";

pub const ASSISTANT_PROMPT: &str = "You are a travel assistant. The user is asking about their trip to {destination}. Provide relevant information based on their question. Also always summarize the answer and give it to them.\nUser Question: {question}";

/// What the traveller asked for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub location: String,
    /// Zero when the request left it out
    #[serde(default)]
    pub no_of_days: u32,
    /// Traveller group, e.g. "a couple" or "3-5 People"
    pub people: String,
    /// Budget tier or amount, e.g. "Moderate" or "25000"
    pub budget: String,
    #[serde(default)]
    pub start_city: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// A place the traveller insists on visiting
    #[serde(default)]
    pub specific_place: Option<String>,
}

impl TripRequest {
    /// Check that every required detail is present
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or invalid field.
    pub fn validate(&self) -> Result<(), TripError> {
        if self.location.trim().is_empty() {
            return Err(TripError::validation("location is required"));
        }
        if !(1..=MAX_DAYS).contains(&self.no_of_days) {
            return Err(TripError::validation(format!(
                "noOfDays must be between 1 and {MAX_DAYS}, got {}",
                self.no_of_days
            )));
        }
        if self.budget.trim().is_empty() {
            return Err(TripError::validation("budget is required"));
        }
        if self.people.trim().is_empty() {
            return Err(TripError::validation("people is required"));
        }
        if self.start_city.trim().is_empty() {
            return Err(TripError::validation("startCity is required"));
        }
        if self.start_date.is_none() {
            return Err(TripError::validation("startDate is required"));
        }
        Ok(())
    }

    /// The budget as a number, when the traveller gave an amount rather than a tier
    #[must_use]
    pub fn budget_amount(&self) -> Option<f64> {
        self.budget
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
    }

    fn formatted_start_date(&self) -> String {
        self.start_date
            .map_or_else(|| "unspecified date".to_string(), |d| d.format("%Y-%m-%d").to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        })
    }
}

/// Meteorological season for `date` (northern hemisphere)
#[must_use]
pub fn season_for(date: NaiveDate) -> Season {
    match date.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

/// One line per day, e.g. `Day 1: Visit Fort, Lake (Old walls; Boating)`
#[must_use]
pub fn itinerary_digest(days: &[ItineraryDay]) -> String {
    if days.is_empty() {
        return "No itinerary provided".to_string();
    }
    days.iter()
        .enumerate()
        .map(|(i, day)| format!("Day {}: {}", i + 1, day.digest()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replace every `{name}` marker with its value
#[must_use]
pub fn render(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// Free-form question about a trip to `destination`
#[must_use]
pub fn assistant_prompt(destination: &str, question: &str) -> String {
    render(
        ASSISTANT_PROMPT,
        &[
            ("destination", destination.trim().to_string()),
            ("question", question.trim().to_string()),
        ],
    )
}

/// Prompt for `kind`, drawing on records already in `context`
#[must_use]
pub fn prompt_for(kind: RecordKind, request: &TripRequest, context: &TripContext) -> String {
    let start_date = request.formatted_start_date();
    let season = request
        .start_date
        .map_or_else(|| "an unspecified season".to_string(), |d| season_for(d).to_string());
    let digest = itinerary_digest(context.days());

    let mut values = vec![
        ("noOfDays", request.no_of_days.to_string()),
        ("people", request.people.clone()),
        ("location", request.location.clone()),
        ("budget", request.budget.clone()),
        ("startDate", start_date.clone()),
    ];

    let template = match kind {
        RecordKind::Hotels => HOTELS_PROMPT,
        RecordKind::Itinerary => {
            let hotel = context.hotels.first();
            values.push((
                "HotelName",
                hotel.map_or_else(|| "Unknown Hotel".to_string(), |h| h.name.clone()),
            ));
            values.push((
                "startingGeoCoordinates",
                hotel
                    .and_then(|h| h.geo)
                    .map_or_else(|| "unknown".to_string(), |g| g.to_query()),
            ));
            values.push((
                "specificPlace",
                request
                    .specific_place
                    .as_deref()
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| format!(" Make sure to include {p}."))
                    .unwrap_or_default(),
            ));
            ITINERARY_PROMPT
        }
        RecordKind::Budget => {
            values.push(("itineraryActivities", digest));
            BUDGET_PROMPT
        }
        RecordKind::Flights => {
            values.push(("fromLocation", request.start_city.clone()));
            values.push(("toLocation", request.location.clone()));
            values.push(("date", start_date));
            FLIGHTS_PROMPT
        }
        RecordKind::Packing => {
            values.push(("season", season));
            values.push(("itineraryActivities", digest));
            PACKING_PROMPT
        }
        RecordKind::Shopping => {
            values.push(("season", season));
            values.push(("itineraryActivities", digest));
            SHOPPING_PROMPT
        }
    };

    render(template, &values)
}
