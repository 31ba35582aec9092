//! Per-day packing lists

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Items to pack for one day of the trip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PackingDay {
    /// Day label, e.g. "Day 1"
    #[serde(skip)]
    pub day: String,
    #[serde(rename = "Clothing", default)]
    pub clothing: Vec<String>,
    #[serde(rename = "Cosmetics", default)]
    pub cosmetics: Vec<String>,
    #[serde(rename = "OtherEssentials", default)]
    pub other_essentials: Vec<String>,
}

/// Packing list ordered by day number.
///
/// Serializes as an object keyed by day label, the shape trip documents store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackingList {
    pub days: Vec<PackingDay>,
}

impl PackingList {
    #[must_use]
    pub fn get(&self, day: &str) -> Option<&PackingDay> {
        self.days.iter().find(|d| d.day == day)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Serialize for PackingList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.day, day)?;
        }
        map.end()
    }
}
