use serde_json::Value;

use super::aliases::Field;
use super::fields::{self, Object};
use super::unwrap_trip;
use crate::models::{Budget, BudgetBreakdown};

/// Budget from a bare amount or an object with a total and/or components
#[must_use]
pub fn normalize_budget(value: &Value) -> Budget {
    match unwrap_trip(value) {
        Value::Object(obj) => from_object(obj),
        other => Budget {
            total: fields::amount(other),
            breakdown: None,
        },
    }
}

fn from_object(obj: &Object) -> Budget {
    let own = Budget {
        total: fields::number(obj, Field::TotalBudget),
        breakdown: breakdown(obj),
    };
    if own.breakdown.is_some() {
        return own;
    }
    match fields::object(obj, Field::BudgetContainer) {
        Some(nested) => {
            let nested = from_object(nested);
            Budget {
                total: own.total.or(nested.total),
                breakdown: nested.breakdown,
            }
        }
        None => own,
    }
}

fn breakdown(obj: &Object) -> Option<BudgetBreakdown> {
    let hotel_cost = fields::number(obj, Field::HotelCost);
    let activities_and_transport = fields::number(obj, Field::ActivitiesAndTransportCost)
        .or_else(|| {
            match (
                fields::number(obj, Field::ActivitiesCost),
                fields::number(obj, Field::TransportCost),
            ) {
                (None, None) => None,
                (activities, transport) => {
                    Some(activities.unwrap_or(0.0) + transport.unwrap_or(0.0))
                }
            }
        });
    if hotel_cost.is_none() && activities_and_transport.is_none() {
        return None;
    }
    Some(BudgetBreakdown {
        hotel_cost: hotel_cost.unwrap_or(0.0),
        activities_and_transport_cost: activities_and_transport.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(25000), Some(25000.0))]
    #[case(json!("₹25,000 INR"), Some(25000.0))]
    #[case(json!("approx 1500.50 USD"), Some(1500.5))]
    #[case(json!("not sure"), None)]
    #[case(json!(null), None)]
    #[case(json!([]), None)]
    fn test_bare_amounts(#[case] input: Value, #[case] total: Option<f64>) {
        let budget = normalize_budget(&input);
        assert_eq!(budget.total, total);
        assert!(budget.breakdown.is_none());
    }

    #[test]
    fn test_total_only_has_no_breakdown() {
        let budget = normalize_budget(&json!({"trip": {"ApproximateTotalBudget": "30,000 INR"}}));
        assert_eq!(
            budget,
            Budget {
                total: Some(30000.0),
                breakdown: None
            }
        );
    }

    #[test]
    fn test_combined_component() {
        let budget = normalize_budget(&json!({
            "TotalBudget": 20000,
            "HotelCost": "12,000 INR",
            "ActivitiesAndTransportCost": 8000
        }));
        let breakdown = budget.breakdown.unwrap();
        assert_eq!(breakdown.hotel_cost, 12000.0);
        assert_eq!(breakdown.activities_and_transport_cost, 8000.0);
        assert_eq!(budget.total_amount(), 20000.0);
    }

    #[test]
    fn test_separate_components_are_summed() {
        let budget = normalize_budget(&json!({
            "budgetBreakdown": {"accommodation": 9000, "activities": 2500, "transport": "1,500"}
        }));
        assert_eq!(budget.total, None);
        assert_eq!(
            budget.breakdown,
            Some(BudgetBreakdown {
                hotel_cost: 9000.0,
                activities_and_transport_cost: 4000.0
            })
        );
        assert_eq!(budget.total_amount(), 13000.0);
    }

    #[test]
    fn test_outer_total_with_nested_components() {
        let budget = normalize_budget(&json!({
            "ApproximateTotalBudget": 15000,
            "Budget": {"HotelCost": 10000}
        }));
        assert_eq!(budget.total, Some(15000.0));
        assert_eq!(budget.breakdown.map(|b| b.activities_and_transport_cost), Some(0.0));
    }

    #[test]
    fn test_empty_object() {
        assert!(normalize_budget(&json!({})).is_empty());
    }
}
