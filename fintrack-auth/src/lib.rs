// Durable client-side storage and configuration shared by the fintrack tools
mod error;
mod settings;
mod token_storage;

pub use error::AuthError;
pub use settings::Settings;
pub use token_storage::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};
