//! Core request building and transport for the GitLab REST API

use compact_str::{format_compact, CompactString};
use reqwest::{
    header::{HeaderMap, ACCEPT},
    Method, RequestBuilder, Response, Url,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    config::{ClientConfig, TokenType},
    error::Result,
    id::UserId,
    params::QueryParams,
    transport::TransportHandle,
    url::{build_url, UrlSegment},
};

/// Header carrying a legacy private token
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";
/// Header carrying a bearer access token
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header selecting the user to impersonate
pub const SUDO_HEADER: &str = "Sudo";
/// Header carrying the webhook secret token on inbound calls
pub const X_GITLAB_TOKEN_HEADER: &str = "X-Gitlab-Token";

const MEDIA_TYPE_JSON: &str = "application/json";

/// Core HTTP client for a GitLab API endpoint
///
/// Builds authenticated invocations from (path, query, body) triples and
/// hands back raw responses. Status-code interpretation and body
/// deserialization are the caller's concern; no retries happen at this
/// layer.
#[derive(Debug)]
pub struct GitlabClient {
    config: ClientConfig,
    base_url: CompactString,
    sudo_as_id: Option<UserId>,
    transport: TransportHandle,
}

impl GitlabClient {
    /// Create a new client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.base_url();
        let transport = TransportHandle::new(config.transport.clone());

        Ok(Self { config, base_url, sudo_as_id: None, transport })
    }

    /// API base URL: host plus version namespace, never ending with `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// User currently impersonated via the Sudo header
    pub fn sudo_as_id(&self) -> Option<UserId> {
        self.sudo_as_id
    }

    /// Set or clear the user to impersonate
    pub fn set_sudo_as_id(&mut self, sudo_as_id: Option<UserId>) {
        self.sudo_as_id = sudo_as_id;
    }

    /// True if TLS certificate validation is currently bypassed
    pub fn ignore_certificate_errors(&self) -> bool {
        self.transport.ignore_certificate_errors()
    }

    /// Enable or disable the TLS certificate trust bypass
    ///
    /// On failure the flag stays false and the secure transport remains in
    /// effect; see [`TransportHandle::set_ignore_certificate_errors`].
    pub fn set_ignore_certificate_errors(&mut self, ignore: bool) -> Result<()> {
        self.transport.set_ignore_certificate_errors(ignore)
    }

    /// Construct a REST URL from the base URL and the non-skipped path
    /// segments
    pub fn api_url(&self, segments: &[&dyn UrlSegment]) -> Result<Url> {
        build_url(&self.base_url, segments)
    }

    /// Validate an inbound webhook against the configured secret token
    ///
    /// Always true when no secret token is configured. Otherwise the
    /// `X-Gitlab-Token` header must be present and match byte for byte.
    pub fn validate_secret_token(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = self.config.secret_token.as_ref() else {
            return true;
        };

        match headers.get(X_GITLAB_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
            Some(token) => token == expected.as_str(),
            None => false,
        }
    }

    /// Perform a GET with the given query parameters and path segments
    #[instrument(skip(self, query, segments))]
    pub async fn get(
        &self,
        query: Option<&QueryParams>,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        self.get_url(query, url).await
    }

    /// Perform a GET against a fully formed URL, e.g. a pagination link
    pub async fn get_url(&self, query: Option<&QueryParams>, url: Url) -> Result<Response> {
        let request = self.invocation(Method::GET, url, query, None)?;
        Ok(request.send().await?)
    }

    /// Perform a GET with an explicit Accept media type
    #[instrument(skip(self, query, segments))]
    pub async fn get_with_accept(
        &self,
        query: Option<&QueryParams>,
        accept: &str,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let accept = (!accept.trim().is_empty()).then_some(accept);
        let request = self.invocation(Method::GET, url, query, accept)?;
        Ok(request.send().await?)
    }

    /// POST a form as a form-urlencoded body
    ///
    /// A [`GitlabForm`](crate::params::GitlabForm) flattens to its ordered key/value pairs; any other
    /// `Serialize` value is encoded directly.
    #[instrument(skip(self, form, segments))]
    pub async fn post_form<F: Serialize + ?Sized>(
        &self,
        form: &F,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::POST, url, None, None)?.form(form);
        Ok(request.send().await?)
    }

    /// POST an arbitrary payload serialized as JSON
    #[instrument(skip(self, payload, segments))]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::POST, url, None, None)?.json(payload);
        Ok(request.send().await?)
    }

    /// POST with parameters in the query string and an empty body
    #[instrument(skip(self, query, segments))]
    pub async fn post_params(
        &self,
        query: &QueryParams,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::POST, url, Some(query), None)?;
        Ok(request.send().await?)
    }

    /// PUT a form as a form-urlencoded body
    ///
    /// A [`GitlabForm`](crate::params::GitlabForm) flattens to its ordered key/value pairs; any other
    /// `Serialize` value is encoded directly.
    #[instrument(skip(self, form, segments))]
    pub async fn put_form<F: Serialize + ?Sized>(
        &self,
        form: &F,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::PUT, url, None, None)?.form(form);
        Ok(request.send().await?)
    }

    /// PUT with the parameter map itself as the form-urlencoded body
    ///
    /// The parameters go on the wire as the request body, not the query
    /// string; use [`GitlabClient::put_form`] for typed forms and the
    /// query-bearing verbs for query-string semantics.
    #[instrument(skip(self, params, segments))]
    pub async fn put_params(
        &self,
        params: &QueryParams,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::PUT, url, None, None)?.form(params);
        Ok(request.send().await?)
    }

    /// Perform a DELETE with the given query parameters, no body
    #[instrument(skip(self, query, segments))]
    pub async fn delete(
        &self,
        query: Option<&QueryParams>,
        segments: &[&dyn UrlSegment],
    ) -> Result<Response> {
        let url = self.api_url(segments)?;
        let request = self.invocation(Method::DELETE, url, query, None)?;
        Ok(request.send().await?)
    }

    /// Build an authenticated request for `url`
    ///
    /// Applies query parameters in wire order, the credential header, the
    /// Sudo header when an act-as-user id is set, and the Accept header
    /// (JSON unless overridden).
    fn invocation(
        &self,
        method: Method,
        url: Url,
        query: Option<&QueryParams>,
        accept: Option<&str>,
    ) -> Result<RequestBuilder> {
        let client = self.transport.client()?;

        debug!(%method, %url, "dispatching request");

        let mut request = client
            .request(method, url)
            .header(ACCEPT, accept.unwrap_or(MEDIA_TYPE_JSON));

        if let Some(query) = query {
            if !query.is_empty() {
                request = request.query(query);
            }
        }

        let (auth_header, auth_value) = self.auth_header();
        request = request.header(auth_header, auth_value.as_str());

        if let Some(id) = self.sudo_as_id {
            if id.value() > 0 {
                request = request.header(SUDO_HEADER, id.value());
            }
        }

        Ok(request)
    }

    /// Credential header name and value, fully determined by the token type
    fn auth_header(&self) -> (&'static str, CompactString) {
        match self.config.token_type {
            TokenType::Access => {
                (AUTHORIZATION_HEADER, format_compact!("Bearer {}", self.config.auth_token))
            },
            TokenType::Private => (PRIVATE_TOKEN_HEADER, self.config.auth_token.clone()),
        }
    }
}
