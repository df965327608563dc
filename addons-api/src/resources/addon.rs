//! Add-on endpoints, including add-on configuration and lifecycle actions.
//!
//! Most operations come in two forms: one addressed by team and add-on id
//! under the API root, and one addressed by a provider callback URL, which
//! replaces the API root entirely for that call.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use addons_core::error::AddonsResult;

use crate::client::{ApiClient, RequestOptions};
use crate::resources::json_body;
use crate::resources::team::BASE_PATH;

fn addon_path(team_id: &str, addon_id: &str) -> String {
    format!("{BASE_PATH}/{team_id}/addons/{addon_id}")
}

/// Add-ons attached to a team.
#[derive(Debug, Clone)]
pub struct Addon {
    api: Arc<ApiClient>,
    config: AddonConfig,
    action: AddonAction,
}

impl Addon {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            config: AddonConfig::new(Arc::clone(&api)),
            action: AddonAction::new(Arc::clone(&api)),
            api,
        }
    }

    /// Configuration of an add-on.
    pub fn config(&self) -> &AddonConfig {
        &self.config
    }

    /// Provisioning lifecycle actions.
    pub fn action(&self) -> &AddonAction {
        &self.action
    }

    /// Get a single add-on.
    pub async fn info(&self, team_id: &str, addon_id: &str) -> AddonsResult<Value> {
        self.api.get(&addon_path(team_id, addon_id)).await
    }

    /// Get an add-on through its callback URL.
    pub async fn info_by_callback_url(&self, callback_url: &str) -> AddonsResult<Value> {
        self.api
            .request(
                Method::GET,
                "",
                RequestOptions::new().base_url(callback_url),
            )
            .await
    }

    /// Create an add-on for a team.
    pub async fn create<B>(&self, team_id: &str, body: &B) -> AddonsResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.api
            .post(&format!("{BASE_PATH}/{team_id}/addons"), json_body(body)?)
            .await
    }

    /// Update an add-on.
    pub async fn update<B>(&self, team_id: &str, addon_id: &str, body: &B) -> AddonsResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.api
            .patch(&addon_path(team_id, addon_id), json_body(body)?)
            .await
    }

    /// Delete an add-on.
    pub async fn delete(&self, team_id: &str, addon_id: &str) -> AddonsResult<Value> {
        self.api.delete(&addon_path(team_id, addon_id)).await
    }
}

/// Configuration of an add-on.
#[derive(Debug, Clone)]
pub struct AddonConfig {
    api: Arc<ApiClient>,
}

impl AddonConfig {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Get the configuration of an add-on.
    pub async fn list(&self, team_id: &str, addon_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{}/config", addon_path(team_id, addon_id)))
            .await
    }

    /// Get the configuration of an add-on through its callback URL.
    pub async fn list_with_callback_url(&self, callback_url: &str) -> AddonsResult<Value> {
        self.api
            .request(
                Method::GET,
                "config",
                RequestOptions::new().base_url(callback_url),
            )
            .await
    }

    /// Update the configuration of an add-on.
    pub async fn update<B>(&self, team_id: &str, addon_id: &str, body: &B) -> AddonsResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.api
            .patch(
                &format!("{}/config", addon_path(team_id, addon_id)),
                json_body(body)?,
            )
            .await
    }

    /// Update the configuration of an add-on through its callback URL.
    pub async fn update_with_callback_url<B>(
        &self,
        callback_url: &str,
        body: &B,
    ) -> AddonsResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.api
            .request(
                Method::PATCH,
                "config",
                RequestOptions::new()
                    .base_url(callback_url)
                    .body(json_body(body)?),
            )
            .await
    }
}

/// Lifecycle operations for add-on provisioning.
///
/// Providers (de)provision add-ons in the background and report back here
/// once the work is complete.
#[derive(Debug, Clone)]
pub struct AddonAction {
    api: Arc<ApiClient>,
}

impl AddonAction {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Mark an add-on as provisioned.
    pub async fn provision(&self, team_id: &str, addon_id: &str) -> AddonsResult<Value> {
        self.post_action(&addon_path(team_id, addon_id), "provision")
            .await
    }

    /// Mark an add-on as provisioned through its callback URL.
    pub async fn provision_with_callback_url(&self, callback_url: &str) -> AddonsResult<Value> {
        self.post_callback_action(callback_url, "provision").await
    }

    /// Mark an add-on as deprovisioned.
    pub async fn deprovision(&self, team_id: &str, addon_id: &str) -> AddonsResult<Value> {
        self.post_action(&addon_path(team_id, addon_id), "deprovision")
            .await
    }

    /// Mark an add-on as deprovisioned through its callback URL.
    pub async fn deprovision_with_callback_url(&self, callback_url: &str) -> AddonsResult<Value> {
        self.post_callback_action(callback_url, "deprovision").await
    }

    async fn post_action(&self, addon_path: &str, action: &str) -> AddonsResult<Value> {
        self.api
            .request(
                Method::POST,
                &format!("{addon_path}/actions/{action}"),
                RequestOptions::new(),
            )
            .await
    }

    async fn post_callback_action(&self, callback_url: &str, action: &str) -> AddonsResult<Value> {
        self.api
            .request(
                Method::POST,
                &format!("actions/{action}"),
                RequestOptions::new().base_url(callback_url),
            )
            .await
    }
}
