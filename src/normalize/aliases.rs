//! Source-key aliases for every canonical field
//!
//! The model drifts between `Price` and `price`, `Activities` and
//! `activities`, nested and flat coordinates. Each canonical field maps to an
//! ordered list of keys; the first key that is present with a usable value
//! wins. New spellings are added here and nowhere else.

/// Canonical fields and the containers they are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    // wrappers and containers
    Trip,
    ConfirmedHotels,
    BudgetHotels,
    Itinerary,
    Activities,
    BudgetContainer,
    PackingList,
    ShoppingList,
    ShoppingSpots,
    Flights,

    // coordinates
    GeoCoordinates,
    Latitude,
    Longitude,

    // hotel
    HotelName,
    HotelAddress,
    Price,
    HotelImageUrl,
    Rating,
    Description,

    // itinerary
    DayLabel,
    DayDate,
    PlaceName,
    PlaceDetails,
    PlaceImageUrl,
    TicketPricing,
    TravelTime,
    HowToTravel,
    BestTimeToVisit,
    EventDate,

    // budget
    TotalBudget,
    HotelCost,
    ActivitiesAndTransportCost,
    ActivitiesCost,
    TransportCost,

    // packing
    Clothing,
    Cosmetics,
    OtherEssentials,

    // shopping
    RecommendedDay,
    NearestItineraryLocation,

    // flights
    AirlineName,
    FlightNumber,
    DepartureAirport,
    DepartureTime,
    ArrivalAirport,
    ArrivalTime,
    FlightDuration,
    BookingUrl,
}

static ALIASES: &[(Field, &[&str])] = &[
    (Field::Trip, &["trip", "Trip", "tripData", "TripData"]),
    (
        Field::ConfirmedHotels,
        &["hotels", "Hotels", "confirmedHotels", "ConfirmedHotels", "HotelOptions", "hotelOptions"],
    ),
    (
        Field::BudgetHotels,
        &[
            "budgetHotels",
            "BudgetHotels",
            "hotelsWithinBudget",
            "HotelsWithinBudget",
            "budget_hotels",
        ],
    ),
    (Field::Itinerary, &["itinerary", "Itinerary", "days", "Days", "dailyPlan", "DailyPlan"]),
    (Field::Activities, &["Activities", "activities", "Activity", "activity", "Places", "places"]),
    (Field::BudgetContainer, &["BudgetBreakdown", "budgetBreakdown", "Budget", "budget"]),
    (Field::PackingList, &["packingList", "PackingList", "packing_list"]),
    (Field::ShoppingList, &["shoppingList", "ShoppingList"]),
    (Field::ShoppingSpots, &["ShoppingSpots"]),
    (Field::Flights, &["flights", "Flights", "FlightOptions", "flightOptions"]),
    (
        Field::GeoCoordinates,
        &[
            "GeoCoordinates",
            "geoCoordinates",
            "Coordinates",
            "coordinates",
            "geo",
            "Geo",
            "location",
            "Location",
        ],
    ),
    (Field::Latitude, &["latitude", "Latitude", "lat", "Lat"]),
    (Field::Longitude, &["longitude", "Longitude", "lng", "Lng", "lon", "long"]),
    (Field::HotelName, &["HotelName", "hotelName", "hotel_name", "name", "Name"]),
    (Field::HotelAddress, &["HotelAddress", "hotelAddress", "hotel_address", "address", "Address"]),
    (Field::Price, &["Price", "price", "PricePerNight", "pricePerNight", "cost", "Cost"]),
    (
        Field::HotelImageUrl,
        &[
            "HotelImageURL",
            "HotelImageUrl",
            "hotelImageUrl",
            "hotelImageURL",
            "ImageURL",
            "imageUrl",
            "image",
        ],
    ),
    (Field::Rating, &["Rating", "rating", "stars", "Stars"]),
    (Field::Description, &["Description", "description", "details", "Details"]),
    (Field::DayLabel, &["Day", "day", "DayLabel", "dayLabel", "title", "Title"]),
    (Field::DayDate, &["Date", "date"]),
    (Field::PlaceName, &["PlaceName", "placeName", "place_name", "place", "name", "Name"]),
    (
        Field::PlaceDetails,
        &[
            "PlaceDetails",
            "placeDetails",
            "place_details",
            "details",
            "Details",
            "description",
            "Description",
        ],
    ),
    (
        Field::PlaceImageUrl,
        &[
            "PlaceImageURL",
            "PlaceImageUrl",
            "placeImageUrl",
            "placeImageURL",
            "ImageURL",
            "imageUrl",
            "image",
        ],
    ),
    (
        Field::TicketPricing,
        &["TicketPricing", "ticketPricing", "TicketPrice", "ticketPrice", "Price", "price"],
    ),
    (Field::TravelTime, &["TravelTime", "travelTime", "travel_time"]),
    (
        Field::HowToTravel,
        &["HowToTravel", "howToTravel", "ModeOfTravel", "modeOfTravel", "Transport", "transport"],
    ),
    (
        Field::BestTimeToVisit,
        &[
            "BestTimeToVisit",
            "bestTimeToVisit",
            "best_time_to_visit",
            "BestTime",
        ],
    ),
    (Field::EventDate, &["EventDate", "eventDate"]),
    (
        Field::TotalBudget,
        &[
            "ApproximateTotalBudget",
            "approximateTotalBudget",
            "TotalBudget",
            "totalBudget",
            "Total",
            "total",
            "Budget",
            "budget",
        ],
    ),
    (
        Field::HotelCost,
        &[
            "HotelCost",
            "hotelCost",
            "hotel_cost",
            "Accommodation",
            "accommodation",
            "Hotels",
            "hotels",
        ],
    ),
    (
        Field::ActivitiesAndTransportCost,
        &[
            "ActivitiesAndTransportCost",
            "activitiesAndTransportCost",
            "ActivityAndTransportCost",
            "activityAndTransportCost",
            "activities_and_transport_cost",
        ],
    ),
    (Field::ActivitiesCost, &["ActivitiesCost", "activitiesCost", "Activities", "activities"]),
    (Field::TransportCost, &["TransportCost", "transportCost", "Transport", "transport"]),
    (Field::Clothing, &["Clothing", "clothing", "Clothes", "clothes"]),
    (Field::Cosmetics, &["Cosmetics", "cosmetics", "Toiletries", "toiletries"]),
    (
        Field::OtherEssentials,
        &[
            "OtherEssentials",
            "otherEssentials",
            "Other Essentials",
            "other_essentials",
            "Essentials",
            "essentials",
        ],
    ),
    (Field::RecommendedDay, &["RecommendedDay", "recommendedDay", "recommended_day"]),
    (
        Field::NearestItineraryLocation,
        &["NearestItineraryLocation", "nearestItineraryLocation", "nearest_itinerary_location"],
    ),
    (Field::AirlineName, &["AirlineName", "airlineName", "Airline", "airline"]),
    (Field::FlightNumber, &["FlightNumber", "flightNumber", "flight_number"]),
    (Field::DepartureAirport, &["DepartureAirport", "departureAirport", "From", "from"]),
    (Field::DepartureTime, &["DepartureTime", "departureTime"]),
    (Field::ArrivalAirport, &["ArrivalAirport", "arrivalAirport", "To", "to"]),
    (Field::ArrivalTime, &["ArrivalTime", "arrivalTime"]),
    (Field::FlightDuration, &["FlightDuration", "flightDuration", "Duration", "duration"]),
    (Field::BookingUrl, &["BookingURL", "BookingUrl", "bookingUrl", "bookingURL", "url"]),
];

/// Accepted source keys for `field`, highest priority first
#[must_use]
pub fn keys(field: Field) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, keys)| *keys)
        .unwrap_or_default()
}
