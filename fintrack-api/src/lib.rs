pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorBody, FintrackApiError};
use repositories::*;
use tower_api_client::{Client as ApiClient, Error as ApiError, Request as ApiRequest};

/// Path prefix shared by every endpoint of the tracker API.
pub const API_PREFIX: &str = "/api/v1";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    /// Client without credentials, for the login and register endpoints.
    pub fn new(server_url: &str) -> Self {
        Self {
            inner: ApiClient::new(&base_url(server_url)),
        }
    }

    pub fn with_token(server_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(&base_url(server_url)).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, FintrackApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }

    /// Like [`Client::send`], but a success with an empty body (such as
    /// `204 No Content`) yields the default response.
    pub async fn send_or_default<R>(&self, request: R) -> Result<R::Response, FintrackApiError>
    where
        R: ApiRequest,
        R::Response: Default,
    {
        match self.inner.send(request).await {
            Err(ApiError::SerdeJson(e)) if is_empty_body(&e) => Ok(R::Response::default()),
            res => res.map_err(From::from),
        }
    }
}

/// serde_json reports an empty input as EOF before the first character.
fn is_empty_body(error: &serde_json::Error) -> bool {
    error.is_eof() && error.line() == 1 && error.column() == 0
}

fn base_url(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), API_PREFIX)
}

pub struct Request;

impl Request {
    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn user() -> UserRepository {
        UserRepository::new()
    }

    pub fn expenses() -> ExpenseRepository {
        ExpenseRepository::new()
    }

    pub fn incomes() -> IncomeRepository {
        IncomeRepository::new()
    }

    pub fn goals() -> GoalRepository {
        GoalRepository::new()
    }

    pub fn jobs() -> JobRepository {
        JobRepository::new()
    }
}
