//! Resource tree for the Addons.io API.
//!
//! Each resource groups the operations for one API noun and hands out its
//! sub-resources by reference. The whole tree is built once, when the
//! [`crate::Client`] is created, so every accessor returns the same
//! instance for the lifetime of its parent.

pub mod addon;
pub mod addon_service;
pub mod oauth;
pub mod team;

use serde::Serialize;
use serde_json::Value;

use addons_core::error::AddonsResult;

pub use addon::{Addon, AddonAction, AddonConfig};
pub use addon_service::{AddonService, AddonServiceField, AddonServicePlan};
pub use oauth::{ClientCredentials, OAuth, Token};
pub use team::{Member, Team};

/// Serialize a caller-supplied body into a JSON value.
pub(crate) fn json_body<B: Serialize + ?Sized>(body: &B) -> AddonsResult<Value> {
    Ok(serde_json::to_value(body)?)
}
