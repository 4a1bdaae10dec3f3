mod app;
pub mod backend;
pub mod cli;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod mutations;
pub mod session;
pub mod state;
pub mod utils;

pub use app::App;
pub use controller::PaginatedController;
pub use error::{ClientError, ErrorKind};
pub use session::{RememberMe, Session, SessionHandle, SessionManager, SessionState};

// Always expose testing module (integration tests need it)
pub mod testing;
