//! Trip context accumulated across model calls
//!
//! A [`TripContext`] holds everything generated for one trip so far. It is an
//! ordinary value: each operation consumes the context and returns the updated
//! one, so concurrent sessions never share state.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::TripError;
use crate::models::{Activity, Budget, Flight, Hotel, ItineraryDay, PackingList, ShoppingSpot};
use crate::normalize::Normalized;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripContext {
    pub start_date: Option<NaiveDate>,
    pub hotels: Vec<Hotel>,
    pub itinerary: Vec<ItineraryDay>,
    pub budget: Option<Budget>,
    pub packing: Option<PackingList>,
    pub shopping: Vec<ShoppingSpot>,
    pub flights: Vec<Flight>,
}

impl TripContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first day of the trip and date every itinerary day from it
    #[must_use]
    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.assign_dates();
        self
    }

    /// Merge freshly normalized records, replacing earlier ones of the same kind
    #[must_use]
    pub fn absorb(mut self, records: Normalized) -> Self {
        debug!(
            kind = %records.kind(),
            records = records.len(),
            "Absorbing records into trip context"
        );
        match records {
            Normalized::Hotels(hotels) => self.hotels = hotels,
            Normalized::Itinerary(days) => {
                self.itinerary = days;
                self.assign_dates();
            }
            Normalized::Budget(budget) => self.budget = Some(budget),
            Normalized::Packing(packing) => self.packing = Some(packing),
            Normalized::Shopping(spots) => self.shopping = spots,
            Normalized::Flights(flights) => self.flights = flights,
        }
        self
    }

    /// Add an activity to the itinerary day falling on `date`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no itinerary day has that date.
    pub fn add_event(mut self, mut activity: Activity, date: NaiveDate) -> Result<Self, TripError> {
        let wanted = date.format(DATE_FORMAT).to_string();
        let day = self
            .itinerary
            .iter_mut()
            .find(|day| day.date.as_deref() == Some(wanted.as_str()))
            .ok_or_else(|| {
                TripError::validation("Selected date is not within the itinerary range")
            })?;

        debug!(place = %activity.place_name, day = %day.day, "Adding event to itinerary");
        activity.event_date = Some(wanted);
        day.activities.push(activity);
        Ok(self)
    }

    #[must_use]
    pub fn days(&self) -> &[ItineraryDay] {
        &self.itinerary
    }

    /// Last itinerary date, when a start date is known
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        let offset = i64::try_from(self.itinerary.len().checked_sub(1)?).ok()?;
        start.checked_add_signed(Duration::days(offset))
    }

    fn assign_dates(&mut self) {
        let Some(start) = self.start_date else {
            return;
        };
        for (offset, day) in (0_i64..).zip(self.itinerary.iter_mut()) {
            day.date = start
                .checked_add_signed(Duration::days(offset))
                .map(|d| d.format(DATE_FORMAT).to_string());
        }
    }
}
