//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use addons_api::{connect, connect_with_token, Client, ClientConfig};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "abc";

/// Config pointing the client at a mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(format!("{}/", server.uri()))
        .with_timeout(Duration::from_secs(5))
}

/// Authenticated client against a mock server.
pub fn client_for(server: &MockServer) -> Client {
    connect_with_token(TOKEN, Some(&mock_config(server))).expect("failed to build client")
}

/// Anonymous client against a mock server.
pub fn anonymous_client_for(server: &MockServer) -> Client {
    connect(Some(&mock_config(server))).expect("failed to build client")
}

/// Responds with the request body, unchanged.
pub struct EchoBody;

impl Respond for EchoBody {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_bytes(request.body.clone())
    }
}

/// The single request a mock server received.
pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}
