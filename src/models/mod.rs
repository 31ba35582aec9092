//! Canonical trip records
//!
//! These are the fixed shapes the rest of the application consumes, organized by concern:
//! - Geo: coordinate pairs shared by hotels, activities and shopping spots
//! - Hotel: accommodation options
//! - Itinerary: days and their activities
//! - Budget: totals and the hotel / activity-and-transport split
//! - Packing: per-day packing lists
//! - Shopping: shopping recommendations
//! - Flight: flight options
//!
//! Field names serialize in the PascalCase form the trip documents use.

pub mod budget;
pub mod flight;
pub mod geo;
pub mod hotel;
pub mod itinerary;
pub mod packing;
pub mod shopping;

pub use budget::{Budget, BudgetBreakdown};
pub use flight::Flight;
pub use geo::GeoCoordinates;
pub use hotel::{Hotel, PRICE_PLACEHOLDER};
pub use itinerary::{Activity, ItineraryDay};
pub use packing::{PackingDay, PackingList};
pub use shopping::{NEAREST_LOCATION_PLACEHOLDER, ShoppingSpot};
