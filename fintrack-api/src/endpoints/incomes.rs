use super::{amount, MessageResponse, PageQuery, Paged, ResourceId};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    pub name: String,
    pub amount: f64,
    pub description: String,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListIncomes {
    query: PageQuery,
}

impl ListIncomes {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(query.page: u32);
    setter!(query.limit: u32);
}

impl Request for ListIncomes {
    type Data = PageQuery;
    type Response = IncomesResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/income/get".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateIncome {
    income: NewIncome,
}

impl CreateIncome {
    pub fn new(income: NewIncome) -> Self {
        Self { income }
    }
}

impl Request for CreateIncome {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/income/add".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateIncome {
    #[serde(skip)]
    income_id: ResourceId,
    #[serde(flatten)]
    income: NewIncome,
}

impl UpdateIncome {
    pub fn new(income_id: impl Into<ResourceId>, income: NewIncome) -> Self {
        Self {
            income_id: income_id.into(),
            income,
        }
    }
}

impl Request for UpdateIncome {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/income/update/{}", self.income_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteIncome {
    pub income_id: ResourceId,
}

impl DeleteIncome {
    pub fn new(income_id: impl Into<ResourceId>) -> Self {
        Self {
            income_id: income_id.into(),
        }
    }
}

impl Request for DeleteIncome {
    type Data = ();
    type Response = MessageResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/income/delete/{}", self.income_id).into()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomesResponse {
    #[serde(default, alias = "income")]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub total_pages: u32,
}

impl Paged for IncomesResponse {
    type Item = Income;

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn into_items(self) -> Vec<Income> {
        self.incomes
    }
}
