pub mod auth;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod jobs;
pub mod user;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier (a Mongo object id on the wire).
pub type ResourceId = String;

/// `?page=&limit=` query shared by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Body of every mutation endpoint on success.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A list response: one page of items plus the server's page count.
pub trait Paged {
    type Item;

    fn total_pages(&self) -> u32;

    fn into_items(self) -> Vec<Self::Item>;
}

pub(crate) fn expose_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Amounts come back as JSON numbers, except for records created from raw
/// form input where the server kept the string.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount '{}'", s))),
    }
}
