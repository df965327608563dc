//! Addons Core - Foundation types shared by the Addons.io API client.
//!
//! This crate provides:
//! - Client configuration (typed record, sanitation, TOML and env loading)
//! - The error taxonomy returned by every API call
//! - Structured logging with tracing
//! - Fixed wire constants (base URL, API version, headers)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::ClientConfig;
pub use error::{AddonsError, AddonsResult};
pub use logging::{init_console_logging, init_logging};
