//! Core HTTP client for the GitLab REST API
//!
//! This crate provides the request-building and transport layer used to talk
//! to a GitLab server: authenticated GET/POST/PUT/DELETE invocations, URL and
//! query construction, webhook secret-token validation, and an opt-in TLS
//! trust override for development endpoints.
//!
//! Endpoint wrappers and response models are intentionally out of scope;
//! callers interpret status codes and deserialize bodies themselves.
//!
//! ```no_run
//! use gitlab_client::{ClientConfig, GitlabClient, QueryParams};
//!
//! # async fn run() -> gitlab_client::Result<()> {
//! let config = ClientConfig::new("https://gitlab.example.com", "glpat-token");
//! let client = GitlabClient::new(config)?;
//!
//! let query = QueryParams::new().with("membership", true);
//! let response = client.get(Some(&query), &[&"projects"]).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod id;
pub mod params;
pub mod transport;
pub mod url;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use api::GitlabClient;
pub use config::{ApiVersion, ClientConfig, ClientConfigBuilder, TokenType, TransportConfig};
pub use error::{ClientError, Result};
pub use id::UserId;
pub use params::{GitlabForm, QueryParams};
