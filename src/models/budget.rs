//! Trip budget model

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("amount pattern is valid"));

/// Hotel vs. activity-and-transport split of a budget
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BudgetBreakdown {
    /// Accommodation cost
    pub hotel_cost: f64,
    /// Activities, tickets and local transport
    pub activities_and_transport_cost: f64,
}

impl BudgetBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.hotel_cost + self.activities_and_transport_cost
    }
}

/// Approximate trip budget (excluding flights)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Budget {
    /// Total stated by the model, if any
    pub total: Option<f64>,
    /// Component split, only when the model gave one
    pub breakdown: Option<BudgetBreakdown>,
}

impl Budget {
    /// Explicit total, else the breakdown sum, else zero
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.total
            .or_else(|| self.breakdown.map(|b| b.total()))
            .unwrap_or(0.0)
    }

    /// Total clamped against a user-chosen ceiling
    #[must_use]
    pub fn capped(&self, ceiling: f64) -> f64 {
        self.total_amount().min(ceiling)
    }

    /// Render the total with a currency tag, e.g. `"25000 INR"`
    #[must_use]
    pub fn format_total(&self, currency: &str) -> String {
        format!("{} {currency}", format_amount(self.total_amount()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.breakdown.is_none()
    }
}

/// Pull the first amount out of free text such as `"₹25,000 INR"` or `"$50-$100 per night"`.
///
/// Thousands separators are dropped; ranges yield their lower bound.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let found = AMOUNT.find(text)?;
    let digits: String = found.as_str().chars().filter(|c| *c != ',').collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Print integral amounts without a fraction
#[must_use]
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
