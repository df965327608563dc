//! Addons API - HTTP client for the Addons.io provisioning API.
//!
//! The API's nouns (teams, add-ons, add-on services, OAuth tokens, add-on
//! configuration and lifecycle actions) are exposed as a tree of resources
//! hanging off a [`Client`]. Every operation issues exactly one
//! authenticated request and returns the parsed JSON body.
//!
//! ```rust,no_run
//! # async fn run() -> addons_core::AddonsResult<()> {
//! let client = addons_api::connect_with_token("token", None)?;
//! let teams = client.team().list().await?;
//! let addon = client
//!     .team()
//!     .addon()
//!     .create("T1", &serde_json::json!({ "plan": "free" }))
//!     .await?;
//! # let _ = (teams, addon);
//! # Ok(())
//! # }
//! ```
//!
//! Pagination, retries, rate limiting and caching are not implemented.

pub mod client;
pub mod connect;
pub mod resources;

// Re-export key types
pub use addons_core::{AddonsError, AddonsResult, ClientConfig};
pub use client::{build_url, ApiClient, RequestOptions};
pub use connect::{connect, connect_with_token, Client};
pub use resources::ClientCredentials;
