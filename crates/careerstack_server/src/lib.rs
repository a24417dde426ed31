//! CareerStack server: HTTP surface over the refresh pipeline.
mod app;
mod config;
mod error;
mod logging;
mod routes;
mod telegram;

pub use app::{build_router, AppState};
pub use config::{ServerConfig, TelegramSettings};
pub use error::ApiError;
pub use logging::{initialize as initialize_logging, LogDestination};
pub use telegram::TelegramNotifier;
