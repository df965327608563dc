//! Client construction.
//!
//! [`connect`] and [`connect_with_token`] sanitize the caller's
//! configuration, build the shared [`ApiClient`] and the full resource tree.

use std::sync::Arc;

use addons_core::config::ClientConfig;
use addons_core::error::AddonsResult;

use crate::client::ApiClient;
use crate::resources::{AddonService, OAuth, Team};

/// Entry point to the Addons.io API.
///
/// Holds the shared [`ApiClient`] and the top-level resources. All
/// resources are built up front; accessors hand out references to them.
#[derive(Debug, Clone)]
pub struct Client {
    api: Arc<ApiClient>,
    oauth: OAuth,
    addon_service: AddonService,
    team: Team,
}

impl Client {
    /// Build a client from a configuration as-is (no sanitation).
    pub fn new(config: &ClientConfig) -> AddonsResult<Self> {
        let api = Arc::new(ApiClient::new(config)?);
        Ok(Self {
            oauth: OAuth::new(Arc::clone(&api)),
            addon_service: AddonService::new(Arc::clone(&api)),
            team: Team::new(Arc::clone(&api)),
            api,
        })
    }

    /// The underlying request executor.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// OAuth resource.
    pub fn oauth(&self) -> &OAuth {
        &self.oauth
    }

    /// Add-on service catalog resource.
    pub fn addon_service(&self) -> &AddonService {
        &self.addon_service
    }

    /// Team resource.
    pub fn team(&self) -> &Team {
        &self.team
    }
}

/// Get a client configured from `config`.
pub fn connect(config: Option<&ClientConfig>) -> AddonsResult<Client> {
    let config = ClientConfig::sanitize(config);
    Client::new(&config)
}

/// Get a client authenticated with `token`.
///
/// `token` replaces any token present in `config`.
pub fn connect_with_token(
    token: impl Into<String>,
    config: Option<&ClientConfig>,
) -> AddonsResult<Client> {
    let mut config = ClientConfig::sanitize(config);
    config.token = Some(token.into());
    Client::new(&config)
}
