use crate::error::AuthError;
use crate::token_storage::FileStore;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Items requested per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Where the session token is kept; the user cache dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://localhost:9080".to_string()
}

fn default_page_size() -> u32 {
    10
}

impl Settings {
    pub fn new() -> Result<Self, AuthError> {
        let config_path =
            std::env::var("FINTRACK_CONFIG").unwrap_or_else(|_| "fintrack.toml".to_string());
        Self::load(&config_path)
    }

    /// Layer the optional config file at `config_path` under environment
    /// variables prefixed with `FINTRACK`.
    pub fn load(config_path: &str) -> Result<Self, AuthError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("FINTRACK").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.server_url.is_empty() {
            return Err(AuthError::Configuration("server_url is required".to_string()));
        }
        if !self.server_url.starts_with("http") {
            return Err(AuthError::Configuration(
                "server_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(AuthError::Configuration(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The durable store for the session token.
    pub fn token_store(&self) -> Result<FileStore, AuthError> {
        match &self.data_dir {
            Some(dir) => Ok(FileStore::in_dir(dir.clone())),
            None => FileStore::new(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            page_size: default_page_size(),
            data_dir: None,
        }
    }
}
