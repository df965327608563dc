//! Add-on service catalog endpoints.

use std::sync::Arc;

use serde_json::Value;

use addons_core::error::AddonsResult;

use crate::client::ApiClient;

const BASE_PATH: &str = "addon-services";

/// Add-on services are the catalog entries that may be provisioned for
/// a team.
#[derive(Debug, Clone)]
pub struct AddonService {
    api: Arc<ApiClient>,
    plan: AddonServicePlan,
    field: AddonServiceField,
}

impl AddonService {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            plan: AddonServicePlan::new(Arc::clone(&api)),
            field: AddonServiceField::new(Arc::clone(&api)),
            api,
        }
    }

    /// Plans offered by an add-on service.
    pub fn plan(&self) -> &AddonServicePlan {
        &self.plan
    }

    /// Configuration fields of an add-on service.
    pub fn field(&self) -> &AddonServiceField {
        &self.field
    }

    /// List add-on services.
    pub async fn list(&self) -> AddonsResult<Value> {
        self.api.get(BASE_PATH).await
    }

    /// Get a single add-on service.
    pub async fn info(&self, addon_service_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{BASE_PATH}/{addon_service_id}"))
            .await
    }
}

/// Pricing plans of an add-on service.
#[derive(Debug, Clone)]
pub struct AddonServicePlan {
    api: Arc<ApiClient>,
}

impl AddonServicePlan {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List the plans of `addon_service_id`.
    pub async fn list(&self, addon_service_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{BASE_PATH}/{addon_service_id}/plans"))
            .await
    }

    /// Get one plan.
    pub async fn info(&self, addon_service_id: &str, plan_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{BASE_PATH}/{addon_service_id}/plans/{plan_id}"))
            .await
    }
}

/// Provisioning fields an add-on service asks for.
#[derive(Debug, Clone)]
pub struct AddonServiceField {
    api: Arc<ApiClient>,
}

impl AddonServiceField {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List the fields of `addon_service_id`.
    pub async fn list(&self, addon_service_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{BASE_PATH}/{addon_service_id}/fields"))
            .await
    }

    /// Get one field.
    pub async fn info(&self, addon_service_id: &str, field_id: &str) -> AddonsResult<Value> {
        self.api
            .get(&format!("{BASE_PATH}/{addon_service_id}/fields/{field_id}"))
            .await
    }
}
