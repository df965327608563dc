//! Team endpoints.

use std::sync::Arc;

use serde_json::Value;

use addons_core::error::AddonsResult;

use crate::client::ApiClient;
use crate::resources::addon::Addon;

pub(crate) const BASE_PATH: &str = "teams";

/// Teams the authenticated token has access to.
#[derive(Debug, Clone)]
pub struct Team {
    api: Arc<ApiClient>,
    member: Member,
    addon: Addon,
}

impl Team {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            member: Member::new(Arc::clone(&api)),
            addon: Addon::new(Arc::clone(&api)),
            api,
        }
    }

    /// Team members.
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Add-ons attached to a team.
    pub fn addon(&self) -> &Addon {
        &self.addon
    }

    /// List teams.
    pub async fn list(&self) -> AddonsResult<Value> {
        self.api.get(BASE_PATH).await
    }

    /// Get a single team.
    pub async fn info(&self, team_id: &str) -> AddonsResult<Value> {
        self.api.get(&format!("{BASE_PATH}/{team_id}")).await
    }
}

/// A member is a user with access to a team.
#[derive(Debug, Clone)]
pub struct Member {
    api: Arc<ApiClient>,
}

impl Member {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List members of a team.
    pub async fn list(&self, team_id: &str) -> AddonsResult<Value> {
        self.api.get(&format!("{BASE_PATH}/{team_id}/members")).await
    }
}
