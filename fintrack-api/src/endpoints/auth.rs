use super::{expose_secret, MessageResponse};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Requests

#[derive(Debug, Serialize)]
pub struct Login {
    email: String,
    #[serde(serialize_with = "expose_secret")]
    password: SecretString,
}

impl Login {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Request for Login {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Serialize)]
pub struct Register {
    name: String,
    email: String,
    #[serde(serialize_with = "expose_secret")]
    password: SecretString,
}

impl Register {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: SecretString) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
        }
    }
}

impl Request for Register {
    type Data = Self;
    type Response = AuthResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/register".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    #[serde(serialize_with = "expose_secret")]
    old_password: SecretString,
    #[serde(serialize_with = "expose_secret")]
    new_password: SecretString,
}

impl ChangePassword {
    pub fn new(old_password: SecretString, new_password: SecretString) -> Self {
        Self {
            old_password,
            new_password,
        }
    }
}

impl Request for ChangePassword {
    type Data = Self;
    type Response = MessageResponse;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/change-password".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}
