//! Trip planning over a [`ModelClient`]
//!
//! For each record kind the planner renders a prompt, asks the model and
//! normalizes whatever comes back. Model failures are errors; malformed
//! model output is not, it just yields empty records.

use tracing::{info, instrument, warn};

use crate::context::TripContext;
use crate::error::TripError;
use crate::llm::ModelClient;
use crate::models::hotel::hotels_within_budget;
use crate::normalize::{Normalized, RecordKind, normalize_response};
use crate::prompts::{self, TripRequest};

#[derive(Debug, Clone)]
pub struct TripPlanner<C> {
    client: C,
}

impl<C: ModelClient> TripPlanner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate and normalize one record kind for `request`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid request or when the model call fails.
    #[instrument(skip(self, request, context), fields(location = %request.location))]
    pub async fn generate(
        &self,
        kind: RecordKind,
        request: &TripRequest,
        context: &TripContext,
    ) -> crate::Result<Normalized> {
        request.validate()?;
        let prompt = prompts::prompt_for(kind, request, context);
        let raw = self.client.generate(&prompt).await?;
        let records = normalize_response(&raw, kind);
        if records.is_empty() {
            warn!(%kind, "Model response produced no records");
        } else {
            info!(%kind, records = records.len(), "Generated records");
        }
        Ok(records)
    }

    /// Hotels for the request, narrowed to the user's budget when it is numeric.
    ///
    /// Falls back to the full list when no hotel fits the budget band.
    ///
    /// # Errors
    ///
    /// Same as [`TripPlanner::generate`].
    pub async fn hotels(&self, request: &TripRequest) -> crate::Result<Normalized> {
        let records = self.generate(RecordKind::Hotels, request, &TripContext::new()).await?;
        let Normalized::Hotels(hotels) = records else {
            return Ok(records);
        };
        let Some(user_budget) = request.budget_amount() else {
            return Ok(Normalized::Hotels(hotels));
        };
        let within = hotels_within_budget(&hotels, user_budget);
        info!(
            total = hotels.len(),
            within = within.len(),
            user_budget,
            "Filtered hotels by budget"
        );
        Ok(Normalized::Hotels(if within.is_empty() { hotels } else { within }))
    }

    /// Build a whole trip: hotels, itinerary from the first hotel, then budget,
    /// packing, shopping and flights on top of that itinerary.
    ///
    /// # Errors
    ///
    /// Same as [`TripPlanner::generate`]; a failing kind aborts the plan.
    #[instrument(skip_all, fields(location = %request.location, days = request.no_of_days))]
    pub async fn plan(&self, request: &TripRequest) -> crate::Result<TripContext> {
        request.validate()?;
        let mut context = TripContext::new();
        if let Some(start) = request.start_date {
            context = context.with_start_date(start);
        }

        context = context.absorb(self.hotels(request).await?);
        for kind in [
            RecordKind::Itinerary,
            RecordKind::Budget,
            RecordKind::Packing,
            RecordKind::Shopping,
            RecordKind::Flights,
        ] {
            let records = self.generate(kind, request, &context).await?;
            context = context.absorb(records);
        }

        if context.itinerary.is_empty() {
            return Err(TripError::api("Model did not return an itinerary"));
        }
        if let (Some(ceiling), Some(budget)) = (request.budget_amount(), context.budget.as_mut()) {
            let capped = budget.capped(ceiling);
            if capped < budget.total_amount() {
                info!(
                    estimate = budget.total_amount(),
                    ceiling,
                    "Capping budget estimate at the user budget"
                );
                budget.total = Some(capped);
            }
        }
        info!(days = context.itinerary.len(), hotels = context.hotels.len(), "Trip planned");
        Ok(context)
    }

    /// Answer a free-form traveller question about `destination`.
    ///
    /// # Errors
    ///
    /// Fails when either input is blank or the model call fails.
    #[instrument(skip(self, question), fields(destination = %destination))]
    pub async fn ask(&self, destination: &str, question: &str) -> crate::Result<String> {
        if destination.trim().is_empty() {
            return Err(TripError::validation("destination is required"));
        }
        if question.trim().is_empty() {
            return Err(TripError::validation("question is required"));
        }
        let prompt = prompts::assistant_prompt(destination, question);
        let answer = self.client.answer(&prompt).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(TripError::api("Model returned an empty answer"));
        }
        info!(len = answer.len(), "Answered traveller question");
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::sync::Mutex;

    /// Replies by matching a marker in the prompt
    struct ScriptedClient {
        replies: Vec<(&'static str, &'static str)>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                replies,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(&self, prompt: &str) -> crate::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .iter()
                .find(|(marker, _)| prompt.contains(marker))
                .map(|(_, reply)| (*reply).to_string())
                .ok_or_else(|| TripError::api("no scripted reply"))
        }
    }

    fn request(budget: &str) -> TripRequest {
        TripRequest {
            location: "Goa, India".to_string(),
            no_of_days: 2,
            people: "a couple".to_string(),
            budget: budget.to_string(),
            start_city: "Mumbai, India".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 11, 20),
            specific_place: None,
        }
    }

    const HOTELS: &str = r#"```json
{"hotels": [
  {"HotelName": "Sea Breeze", "Price": "5000 INR", "GeoCoordinates": {"latitude": 15.55, "longitude": 73.75}},
  {"HotelName": "Palm Grove", "Price": "20000 INR"}
]}
```"#;

    const ITINERARY: &str = r#"{"itinerary": {"Day 2": {"Activities": ["Dudhsagar Falls"]}, "Day 1": {"Activities": [{"PlaceName": "Fort Aguada", "PlaceDetails": "Sea fort"}]}}}"#;

    #[tokio::test]
    async fn test_generate_normalizes_reply() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![("list of hotels", HOTELS)]));
        let records = planner
            .generate(RecordKind::Hotels, &request("Moderate"), &TripContext::new())
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_request() {
        let planner = TripPlanner::new(ScriptedClient::new(Vec::new()));
        let bad = TripRequest {
            no_of_days: 0,
            ..request("Moderate")
        };
        let result = planner.generate(RecordKind::Hotels, &bad, &TripContext::new()).await;
        assert!(matches!(result, Err(TripError::Validation { .. })));
        assert!(planner.client().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_empty_not_error() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![(
            "list of hotels",
            "I cannot help with that.",
        )]));
        let records = planner
            .generate(RecordKind::Hotels, &request("Moderate"), &TripContext::new())
            .await
            .unwrap();
        assert_eq!(records, Normalized::empty(RecordKind::Hotels));
    }

    #[tokio::test]
    async fn test_hotels_filtered_by_numeric_budget() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![("list of hotels", HOTELS)]));
        let Normalized::Hotels(hotels) = planner.hotels(&request("10000")).await.unwrap() else {
            panic!("expected hotels");
        };
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Sea Breeze");
    }

    #[tokio::test]
    async fn test_plan_builds_dated_trip() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![
            ("list of hotels", HOTELS),
            ("travel itinerary", ITINERARY),
            ("Estimate the budget", r#"{"ApproximateTotalBudget": "18,000 INR"}"#),
            ("packing list", r#"{"Day 1": {"Clothing": ["Swimwear"]}, "Tips": "stay hydrated"}"#),
            ("shopping spots", r#"{"ShoppingSpots": [{"PlaceName": "Anjuna Flea Market"}]}"#),
            ("Suggest flights", r#"[{"AirlineName": "IndiGo", "BookingURL": "goindigo.in"}]"#),
        ]));

        let trip = planner.plan(&request("Moderate")).await.unwrap();
        assert_eq!(trip.hotels.len(), 2);
        assert_eq!(trip.days()[0].day, "Day 1");
        assert_eq!(trip.days()[0].date.as_deref(), Some("2025-11-20"));
        assert_eq!(trip.days()[1].date.as_deref(), Some("2025-11-21"));
        assert_eq!(trip.budget.map(|b| b.total_amount()), Some(18000.0));
        assert!(trip.packing.as_ref().is_some_and(|p| p.get("Day 1").is_some()));
        assert_eq!(trip.shopping[0].place_name, "Anjuna Flea Market");
        assert_eq!(trip.flights[0].booking_url, "https://goindigo.in");

        let prompts = planner.client().prompts.lock().unwrap();
        let itinerary_prompt = prompts.iter().find(|p| p.contains("travel itinerary")).unwrap();
        assert!(itinerary_prompt.contains("Sea Breeze at GeoCoordinates 15.55,73.75"));
        let packing_prompt = prompts.iter().find(|p| p.contains("packing list")).unwrap();
        assert!(packing_prompt.contains("Day 1: Visit Fort Aguada (Sea fort)"));
        assert!(packing_prompt.contains("in autumn"));
    }

    #[tokio::test]
    async fn test_plan_caps_budget_at_numeric_request_budget() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![
            ("list of hotels", HOTELS),
            ("travel itinerary", ITINERARY),
            ("Estimate the budget", r#"{"HotelCost": 30000, "ActivitiesAndTransportCost": 8000}"#),
            ("packing list", "{}"),
            ("shopping spots", "{}"),
            ("Suggest flights", "[]"),
        ]));

        let trip = planner.plan(&request("25000")).await.unwrap();
        let budget = trip.budget.unwrap();
        assert_eq!(budget.total, Some(25000.0));
        assert_eq!(budget.breakdown.map(|b| b.total()), Some(38000.0));

        let trip = planner.plan(&request("Moderate")).await.unwrap();
        assert_eq!(trip.budget.map(|b| b.total_amount()), Some(38000.0));
    }

    #[tokio::test]
    async fn test_plan_keeps_budget_under_ceiling() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![
            ("list of hotels", HOTELS),
            ("travel itinerary", ITINERARY),
            ("Estimate the budget", r#"{"ApproximateTotalBudget": 18000}"#),
            ("packing list", "{}"),
            ("shopping spots", "{}"),
            ("Suggest flights", "[]"),
        ]));
        let trip = planner.plan(&request("25000")).await.unwrap();
        assert_eq!(trip.budget.and_then(|b| b.total), Some(18000.0));
    }

    #[tokio::test]
    async fn test_ask_sends_assistant_prompt() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![(
            "travel assistant",
            "  Carry an umbrella; the monsoon ends in September.\n",
        )]));
        let answer = planner.ask("Goa", "Will it rain in October?").await.unwrap();
        assert_eq!(answer, "Carry an umbrella; the monsoon ends in September.");

        let prompts = planner.client().prompts.lock().unwrap();
        assert!(prompts[0].contains("their trip to Goa."));
        assert!(prompts[0].contains("User Question: Will it rain in October?"));
    }

    #[rstest]
    #[case("", "Best beaches?")]
    #[case("Goa", "   ")]
    #[tokio::test]
    async fn test_ask_rejects_blank_input(#[case] destination: &str, #[case] question: &str) {
        let planner = TripPlanner::new(ScriptedClient::new(Vec::new()));
        let result = planner.ask(destination, question).await;
        assert!(matches!(result, Err(TripError::Validation { .. })));
        assert!(planner.client().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ask_empty_answer_is_error() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![("travel assistant", " \n ")]));
        let result = planner.ask("Goa", "Best beaches?").await;
        assert!(matches!(result, Err(TripError::Api { .. })));
    }

    #[tokio::test]
    async fn test_plan_fails_without_itinerary() {
        let planner = TripPlanner::new(ScriptedClient::new(vec![
            ("list of hotels", HOTELS),
            ("travel itinerary", "no idea"),
            ("Estimate the budget", "{}"),
            ("packing list", "{}"),
            ("shopping spots", "{}"),
            ("Suggest flights", "[]"),
        ]));
        let result = planner.plan(&request("Moderate")).await;
        assert!(matches!(result, Err(TripError::Api { .. })));
    }
}
