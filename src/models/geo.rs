//! Geographic coordinate pair

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair attached to hotels, activities and shopping spots
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoCoordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoCoordinates {
    /// Build a coordinate pair, rejecting non-finite or out-of-range values
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `"lat, lng"` string
    #[must_use]
    pub fn parse_pair(text: &str) -> Option<Self> {
        let (lat, lng) = text.split_once(',')?;
        let latitude = lat.trim().parse::<f64>().ok()?;
        let longitude = lng.trim().parse::<f64>().ok()?;
        Self::new(latitude, longitude)
    }

    /// Format as a `lat,lng` query string, e.g. for map links
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}
