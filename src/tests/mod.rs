//! Test utilities and shared fixtures for the client modules


use crate::{api::GitlabClient, config::ClientConfig};

/// Mock HTTP server wrapper with client fixtures
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self { server: wiremock::MockServer::start().await }
    }

    /// Base URL of the mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Config pointing at this mock server, private-token auth
    pub fn test_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url(), "test-token")
    }

    /// Ready-to-use client pointing at this mock server
    pub fn test_client(&self) -> GitlabClient {
        GitlabClient::new(self.test_config()).unwrap()
    }
}
