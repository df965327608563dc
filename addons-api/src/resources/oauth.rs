//! OAuth endpoints.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use addons_core::error::AddonsResult;

use crate::client::ApiClient;
use crate::resources::json_body;

const BASE_PATH: &str = "oauth";

/// OAuth client credentials issued to an add-on provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub id: String,
    pub secret: String,
}

impl ClientCredentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

/// Body of a `POST oauth/token` request.
#[derive(Debug, Serialize)]
struct TokenGrant<'a> {
    grant_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
    client_id: &'a str,
    client_secret: &'a str,
}

/// OAuth resource.
#[derive(Debug, Clone)]
pub struct OAuth {
    token: Token,
}

impl OAuth {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            token: Token::new(api),
        }
    }

    /// Token exchange and refresh.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

/// OAuth token operations.
#[derive(Debug, Clone)]
pub struct Token {
    api: Arc<ApiClient>,
}

impl Token {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Exchange an authorization code for an access token.
    pub async fn create(&self, client: &ClientCredentials, code: &str) -> AddonsResult<Value> {
        let grant = TokenGrant {
            grant_type: "authorization_code",
            code: Some(code),
            refresh_token: None,
            client_id: &client.id,
            client_secret: &client.secret,
        };
        self.api
            .post(&format!("{BASE_PATH}/token"), json_body(&grant)?)
            .await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(
        &self,
        client: &ClientCredentials,
        refresh_token: &str,
    ) -> AddonsResult<Value> {
        let grant = TokenGrant {
            grant_type: "refresh_token",
            code: None,
            refresh_token: Some(refresh_token),
            client_id: &client.id,
            client_secret: &client.secret,
        };
        self.api
            .post(&format!("{BASE_PATH}/token"), json_body(&grant)?)
            .await
    }
}
