use super::{amount, MessageResponse, PageQuery, Paged, ResourceId};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Position title
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub salary: f64,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub name: String,
    pub salary: f64,
    pub organization: String,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListJobs {
    query: PageQuery,
}

impl ListJobs {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(query.page: u32);
    setter!(query.limit: u32);
}

impl Request for ListJobs {
    type Data = PageQuery;
    type Response = JobsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/job/get".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateJob {
    job: NewJob,
}

impl CreateJob {
    pub fn new(job: NewJob) -> Self {
        Self { job }
    }
}

impl Request for CreateJob {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/job/add".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateJob {
    #[serde(skip)]
    job_id: ResourceId,
    #[serde(flatten)]
    job: NewJob,
}

impl UpdateJob {
    pub fn new(job_id: impl Into<ResourceId>, job: NewJob) -> Self {
        Self {
            job_id: job_id.into(),
            job,
        }
    }
}

impl Request for UpdateJob {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/job/update/{}", self.job_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteJob {
    pub job_id: ResourceId,
}

impl DeleteJob {
    pub fn new(job_id: impl Into<ResourceId>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl Request for DeleteJob {
    type Data = ();
    type Response = MessageResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/job/delete/{}", self.job_id).into()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsResponse {
    #[serde(default, alias = "job")]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub total_pages: u32,
}

impl Paged for JobsResponse {
    type Item = Job;

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn into_items(self) -> Vec<Job> {
        self.jobs
    }
}
