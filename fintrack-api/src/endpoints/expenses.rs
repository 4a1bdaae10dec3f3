use super::{amount, MessageResponse, PageQuery, Paged, ResourceId};
use crate::macros::setter;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub is_recurring: bool,
    /// Day the expense is (or was) deducted
    #[serde(default)]
    pub deduction_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "createdAt")]
    pub date: Option<DateTime<Utc>>,
}

/// Payload for both `/expense/add` and `/expense/update/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub name: String,
    pub amount: f64,
    pub is_recurring: bool,
    pub deduction_date: NaiveDate,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListExpenses {
    query: PageQuery,
}

impl ListExpenses {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(query.page: u32);
    setter!(query.limit: u32);
}

impl Request for ListExpenses {
    type Data = PageQuery;
    type Response = ExpensesResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expense/get".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateExpense {
    expense: NewExpense,
}

impl CreateExpense {
    pub fn new(expense: NewExpense) -> Self {
        Self { expense }
    }
}

impl Request for CreateExpense {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expense/add".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateExpense {
    #[serde(skip)]
    expense_id: ResourceId,
    #[serde(flatten)]
    expense: NewExpense,
}

impl UpdateExpense {
    pub fn new(expense_id: impl Into<ResourceId>, expense: NewExpense) -> Self {
        Self {
            expense_id: expense_id.into(),
            expense,
        }
    }
}

impl Request for UpdateExpense {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expense/update/{}", self.expense_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExpense {
    pub expense_id: ResourceId,
}

impl DeleteExpense {
    pub fn new(expense_id: impl Into<ResourceId>) -> Self {
        Self {
            expense_id: expense_id.into(),
        }
    }
}

impl Request for DeleteExpense {
    type Data = ();
    type Response = MessageResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expense/delete/{}", self.expense_id).into()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesResponse {
    #[serde(default, alias = "expense")]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub total_pages: u32,
}

impl Paged for ExpensesResponse {
    type Item = Expense;

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn into_items(self) -> Vec<Expense> {
        self.expenses
    }
}
