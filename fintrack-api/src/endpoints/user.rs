use super::{amount, goals::Goal, jobs::Job, MessageResponse, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// Recent income or expense shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    /// Only incomes carry a description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub date: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn is_income(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetUser;

impl Request for GetUser {
    type Data = ();
    type Response = UserDetails;

    fn endpoint(&self) -> Cow<'_, str> {
        "/user/get".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditName {
    name: String,
}

impl EditName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Request for EditName {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        "/user/edit-name".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user: User,
    #[serde(default, deserialize_with = "amount")]
    pub total_expense: f64,
    #[serde(default)]
    pub job: Option<Job>,
    #[serde(default)]
    pub current_goal: Option<Goal>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_details_tolerates_missing_sections() {
        let details: UserDetails =
            serde_json::from_str(r#"{"user":{"name":"Ana","email":"ana@example.com"}}"#).unwrap();
        assert_eq!(details.user.name, "Ana");
        assert_eq!(details.total_expense, 0.0);
        assert!(details.job.is_none());
        assert!(details.activities.is_empty());
    }

    #[test]
    fn activity_with_description_is_income() {
        let activities: Vec<Activity> = serde_json::from_str(
            r#"[{"_id":"a","name":"Salary","amount":3000,"description":"May"},
                {"_id":"b","name":"Rent","amount":1200}]"#,
        )
        .unwrap();
        assert!(activities[0].is_income());
        assert!(!activities[1].is_income());
    }
}
