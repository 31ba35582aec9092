//! Schema normalizer
//!
//! Maps loosely shaped model JSON onto the canonical records in
//! [`crate::models`]. Normalization is total: missing or mistyped fields get
//! their defaults and unusable input yields an empty structure.
//!
//! Source keys are resolved through the alias table in [`aliases`].

pub mod aliases;
mod budget;
mod fields;
mod flights;
mod hotels;
mod itinerary;
mod packing;
mod shopping;

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::TripError;
use crate::models::{Budget, Flight, Hotel, ItineraryDay, PackingList, ShoppingSpot};
use crate::sanitizer;

pub use budget::normalize_budget;
pub use flights::normalize_flights;
pub use hotels::normalize_hotels;
pub use itinerary::normalize_itinerary;
pub use packing::normalize_packing;
pub use shopping::normalize_shopping;

/// Currency tag appended to bare numeric prices
pub const DEFAULT_CURRENCY: &str = "INR";

/// The record families a model response can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Hotels,
    Itinerary,
    Budget,
    Packing,
    Shopping,
    Flights,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Hotels,
        RecordKind::Itinerary,
        RecordKind::Budget,
        RecordKind::Packing,
        RecordKind::Shopping,
        RecordKind::Flights,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Hotels => "hotels",
            RecordKind::Itinerary => "itinerary",
            RecordKind::Budget => "budget",
            RecordKind::Packing => "packing",
            RecordKind::Shopping => "shopping",
            RecordKind::Flights => "flights",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                TripError::validation(format!(
                    "unknown record kind '{s}', expected one of hotels, itinerary, budget, packing, shopping, flights"
                ))
            })
    }
}

/// Canonical records for one [`RecordKind`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Hotels(Vec<Hotel>),
    Itinerary(Vec<ItineraryDay>),
    Budget(Budget),
    Packing(PackingList),
    Shopping(Vec<ShoppingSpot>),
    Flights(Vec<Flight>),
}

impl Normalized {
    /// Documented empty default for `kind`
    #[must_use]
    pub fn empty(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Hotels => Normalized::Hotels(Vec::new()),
            RecordKind::Itinerary => Normalized::Itinerary(Vec::new()),
            RecordKind::Budget => Normalized::Budget(Budget::default()),
            RecordKind::Packing => Normalized::Packing(PackingList::default()),
            RecordKind::Shopping => Normalized::Shopping(Vec::new()),
            RecordKind::Flights => Normalized::Flights(Vec::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Normalized::Hotels(_) => RecordKind::Hotels,
            Normalized::Itinerary(_) => RecordKind::Itinerary,
            Normalized::Budget(_) => RecordKind::Budget,
            Normalized::Packing(_) => RecordKind::Packing,
            Normalized::Shopping(_) => RecordKind::Shopping,
            Normalized::Flights(_) => RecordKind::Flights,
        }
    }

    /// Number of records; a budget counts as one when it carries any amount
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Normalized::Hotels(v) => v.len(),
            Normalized::Itinerary(v) => v.len(),
            Normalized::Budget(b) => usize::from(!b.is_empty()),
            Normalized::Packing(p) => p.days.len(),
            Normalized::Shopping(v) => v.len(),
            Normalized::Flights(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize an already parsed value
#[must_use]
pub fn normalize(value: &Value, kind: RecordKind) -> Normalized {
    let normalized = match kind {
        RecordKind::Hotels => Normalized::Hotels(normalize_hotels(value)),
        RecordKind::Itinerary => Normalized::Itinerary(normalize_itinerary(value)),
        RecordKind::Budget => Normalized::Budget(normalize_budget(value)),
        RecordKind::Packing => Normalized::Packing(normalize_packing(value)),
        RecordKind::Shopping => Normalized::Shopping(normalize_shopping(value)),
        RecordKind::Flights => Normalized::Flights(normalize_flights(value)),
    };
    debug!(kind = %kind, records = normalized.len(), "Normalized model response");
    normalized
}

/// Sanitize raw model text, then normalize it.
///
/// Unrecoverable text yields the empty structure for `kind`.
#[must_use]
pub fn normalize_response(raw: &str, kind: RecordKind) -> Normalized {
    match sanitizer::extract_value(raw) {
        Ok(value) => normalize(&value, kind),
        Err(e) => {
            warn!(kind = %kind, error = %e, "Falling back to empty records");
            Normalized::empty(kind)
        }
    }
}

/// Descend through `trip`/`tripData` wrappers
fn unwrap_trip(value: &Value) -> &Value {
    let mut current = value;
    while let Some(inner) = current
        .as_object()
        .and_then(|obj| fields::candidates(obj, aliases::Field::Trip).find(|v| v.is_object()))
    {
        current = inner;
    }
    current
}
