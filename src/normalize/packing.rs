use serde_json::Value;

use super::aliases::{Field, keys};
use super::fields;
use super::unwrap_trip;
use crate::models::{PackingDay, PackingList};

/// Packing list keyed by day.
///
/// Only keys starting with `Day` are kept; anything else the model adds
/// alongside (notes, tips) is dropped.
#[must_use]
pub fn normalize_packing(value: &Value) -> PackingList {
    let value = unwrap_trip(value);
    let Some(obj) = value.as_object() else {
        return PackingList::default();
    };
    let obj = fields::object(obj, Field::PackingList).unwrap_or(obj);

    let mut entries: Vec<(&String, &Value)> =
        obj.iter().filter(|(key, _)| key.starts_with("Day")).collect();
    entries.sort_by(|(a, _), (b, _)| fields::day_order(a, b));

    let days = entries
        .into_iter()
        .map(|(key, day)| {
            let category = |field: Field| {
                fields::string_list(
                    day.as_object()
                        .and_then(|obj| keys(field).iter().find_map(|k| obj.get(*k))),
                )
            };
            PackingDay {
                day: key.clone(),
                clothing: category(Field::Clothing),
                cosmetics: category(Field::Cosmetics),
                other_essentials: category(Field::OtherEssentials),
            }
        })
        .collect();

    PackingList { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_only_day_keys_survive() {
        let list =
            normalize_packing(&json!({"Day 1": {"Clothing": ["Jacket"]}, "Notes": "ignore me"}));
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({"Day 1": {"Clothing": ["Jacket"], "Cosmetics": [], "OtherEssentials": []}})
        );
    }

    #[test]
    fn test_wrapper_and_ordering() {
        let value = json!({
            "packingList": {
                "Day 2": {"clothing": ["Shorts"], "toiletries": ["Sunscreen", 50]},
                "Day 1": {"Clothing": "Jacket", "OtherEssentials": ["Passport", {"x": 1}]},
                "day 3": {"Clothing": ["Ignored: lowercase key"]}
            }
        });
        let list = normalize_packing(&value);
        let labels: Vec<&str> = list.days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, vec!["Day 1", "Day 2"]);

        let first = list.get("Day 1").unwrap();
        assert!(first.clothing.is_empty());
        assert_eq!(first.other_essentials, vec!["Passport"]);

        let second = list.get("Day 2").unwrap();
        assert_eq!(second.clothing, vec!["Shorts"]);
        assert_eq!(second.cosmetics, vec!["Sunscreen", "50"]);
    }

    #[test]
    fn test_non_object_day_has_empty_categories() {
        let list = normalize_packing(&json!({"Day 1": "pack light"}));
        assert_eq!(list.days.len(), 1);
        assert_eq!(list.days[0], PackingDay { day: "Day 1".to_string(), ..PackingDay::default() });
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!([]))]
    #[case(json!(null))]
    #[case(json!({"Notes": "ignore me"}))]
    fn test_empty_inputs(#[case] input: Value) {
        let list = normalize_packing(&input);
        assert!(list.is_empty());
        assert_eq!(serde_json::to_value(&list).unwrap(), json!({}));
    }
}
