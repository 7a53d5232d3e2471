//! Configuration management for the GitLab client

use std::time::Duration;

use compact_str::{format_compact, CompactString};

use crate::error::{ClientError, Result};

/// GitLab REST API version, selecting the URL namespace suffix
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum ApiVersion {
    V3,
    #[default]
    V4,
}

impl ApiVersion {
    /// URL namespace appended to the host URL
    pub fn api_namespace(&self) -> &'static str {
        match self {
            ApiVersion::V3 => "/api/v3",
            ApiVersion::V4 => "/api/v4",
        }
    }
}

/// How the auth token is presented to the server
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum TokenType {
    /// Legacy private token, sent as `PRIVATE-TOKEN: <token>`
    #[default]
    Private,
    /// Access token, sent as `Authorization: Bearer <token>`
    Access,
}

/// Options passed through verbatim to the underlying HTTP transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main configuration for the GitLab client
///
/// Immutable once handed to the client; the act-as-user id and the TLS trust
/// override live on the client itself because they may change at runtime.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitLab instance host URL, e.g. `https://gitlab.example.com`
    pub host_url: CompactString,
    /// API version namespace to use
    pub api_version: ApiVersion,
    /// How the auth token is presented
    pub token_type: TokenType,
    /// Token to authenticate outbound requests with
    pub auth_token: CompactString,
    /// Pre-shared token for validating inbound webhook payloads
    pub secret_token: Option<CompactString>,
    /// Transport configuration
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Create a new configuration with default version (V4) and token type
    /// (private token)
    pub fn new(host_url: impl Into<CompactString>, auth_token: impl Into<CompactString>) -> Self {
        Self {
            host_url: host_url.into(),
            api_version: ApiVersion::default(),
            token_type: TokenType::default(),
            auth_token: auth_token.into(),
            secret_token: None,
            transport: TransportConfig::default(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// API base URL: host with trailing slashes stripped plus the version
    /// namespace. Never ends with `/`.
    pub fn base_url(&self) -> CompactString {
        format_compact!(
            "{}{}",
            self.host_url.trim_end_matches('/'),
            self.api_version.api_namespace()
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host_url.is_empty() {
            return Err(ClientError::config("Host URL cannot be empty"));
        }

        if !self.host_url.starts_with("http://") && !self.host_url.starts_with("https://") {
            return Err(ClientError::config("Host URL must start with http:// or https://"));
        }

        if self.auth_token.is_empty() {
            return Err(ClientError::config("Auth token cannot be empty"));
        }

        if self.transport.timeout.is_zero() {
            return Err(ClientError::config_validation("timeout", "must be greater than zero"));
        }

        if self.transport.connect_timeout.is_zero() {
            return Err(ClientError::config_validation(
                "connect_timeout",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Set the API version
    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the token type
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the webhook secret token
    ///
    /// The token is trimmed; a blank token counts as absent.
    pub fn with_secret_token(mut self, secret_token: impl AsRef<str>) -> Self {
        let trimmed = secret_token.as_ref().trim();
        self.secret_token = (!trimmed.is_empty()).then(|| CompactString::from(trimmed));
        self
    }

    /// Set the transport configuration
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    host_url: Option<CompactString>,
    api_version: Option<ApiVersion>,
    token_type: Option<TokenType>,
    auth_token: Option<CompactString>,
    secret_token: Option<CompactString>,
    transport: Option<TransportConfig>,
}

impl ClientConfigBuilder {
    /// Set the host URL
    pub fn host_url(mut self, host_url: impl Into<CompactString>) -> Self {
        self.host_url = Some(host_url.into());
        self
    }

    /// Set the API version
    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = Some(api_version);
        self
    }

    /// Set the token type
    pub fn token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Set the auth token
    pub fn auth_token(mut self, auth_token: impl Into<CompactString>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Set the webhook secret token; blank tokens count as absent
    pub fn secret_token(mut self, secret_token: impl AsRef<str>) -> Self {
        let trimmed = secret_token.as_ref().trim();
        self.secret_token = (!trimmed.is_empty()).then(|| CompactString::from(trimmed));
        self
    }

    /// Set the transport configuration
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut transport = self.transport.unwrap_or_default();
        transport.timeout = timeout;
        self.transport = Some(transport);
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        let mut transport = self.transport.unwrap_or_default();
        transport.connect_timeout = connect_timeout;
        self.transport = Some(transport);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let host_url = self
            .host_url
            .ok_or_else(|| ClientError::config("Host URL is required"))?;
        let auth_token = self
            .auth_token
            .ok_or_else(|| ClientError::config("Auth token is required"))?;

        let config = ClientConfig {
            host_url,
            api_version: self.api_version.unwrap_or_default(),
            token_type: self.token_type.unwrap_or_default(),
            auth_token,
            secret_token: self.secret_token,
            transport: self.transport.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
