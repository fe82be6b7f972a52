pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod permissions;
pub mod phone;
pub mod session;

// Re-export the handful of types nearly every caller touches.
pub use api::ApiClient;
pub use config::ConsoleConfig;
pub use error::{ApiError, ValidationError};
pub use session::{Session, SessionStore};
