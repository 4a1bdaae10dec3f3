use super::{amount, MessageResponse, PageQuery, Paged, ResourceId};
use crate::macros::setter;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub target_amount: f64,
    /// Amount contributed so far; missing until the first contribution
    #[serde(default, deserialize_with = "amount")]
    pub saved_amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "amount")]
    pub monthly_contribution: f64,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub is_achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub description: String,
    pub monthly_contribution: f64,
    pub deadline: NaiveDate,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListGoals {
    query: PageQuery,
}

impl ListGoals {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(query.page: u32);
    setter!(query.limit: u32);
}

impl Request for ListGoals {
    type Data = PageQuery;
    type Response = GoalsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/goal/get".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateGoal {
    goal: NewGoal,
}

impl CreateGoal {
    pub fn new(goal: NewGoal) -> Self {
        Self { goal }
    }
}

impl Request for CreateGoal {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/goal/add".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateGoal {
    #[serde(skip)]
    goal_id: ResourceId,
    #[serde(flatten)]
    goal: NewGoal,
}

impl UpdateGoal {
    pub fn new(goal_id: impl Into<ResourceId>, goal: NewGoal) -> Self {
        Self {
            goal_id: goal_id.into(),
            goal,
        }
    }
}

impl Request for UpdateGoal {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/goal/update/{}", self.goal_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGoal {
    pub goal_id: ResourceId,
}

impl DeleteGoal {
    pub fn new(goal_id: impl Into<ResourceId>) -> Self {
        Self {
            goal_id: goal_id.into(),
        }
    }
}

impl Request for DeleteGoal {
    type Data = ();
    type Response = MessageResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/goal/delete/{}", self.goal_id).into()
    }
}

/// Adds money to the user's current goal.
#[derive(Debug, Clone, Serialize)]
pub struct Contribute {
    amount: f64,
}

impl Contribute {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl Request for Contribute {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        "/goal/contribute".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsResponse {
    #[serde(default, alias = "goal")]
    pub goals: Vec<Goal>,
    /// The goal contributions currently go to
    #[serde(default)]
    pub current_goal: Option<Goal>,
    #[serde(default)]
    pub total_pages: u32,
}

impl Paged for GoalsResponse {
    type Item = Goal;

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn into_items(self) -> Vec<Goal> {
        self.goals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_without_contributions_has_zero_saved() {
        let goal: Goal = serde_json::from_str(
            r#"{"_id":"g1","name":"Car","targetAmount":"5000","monthlyContribution":250,
                "deadline":"2025-12-31T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(goal.saved_amount, 0.0);
        assert_eq!(goal.target_amount, 5000.0);
        assert!(!goal.is_achieved);
    }

    #[test]
    fn goals_response_keeps_current_goal() {
        let res: GoalsResponse = serde_json::from_str(
            r#"{"goal":[],"currentGoal":{"_id":"g1","name":"Car","targetAmount":10,
                "deadline":"2025-12-31T00:00:00Z"},"totalPages":0}"#,
        )
        .unwrap();
        assert_eq!(res.current_goal.map(|g| g.id), Some("g1".to_string()));
        assert!(res.goals.is_empty());
    }
}
