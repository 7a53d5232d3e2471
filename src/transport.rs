//! Lazily built, rebuildable HTTP transport handle

use std::sync::Mutex;

use reqwest::{redirect::Policy, Client};
use tracing::{debug, warn};

use crate::{
    config::TransportConfig,
    error::{ClientError, Result},
};

/// Cached `reqwest::Client`, rebuilt after trust-mode changes
///
/// The client is built on first use and reused for every request until a
/// trust-mode change invalidates it, so each transition rebuilds at most
/// once. The cache sits behind a mutex; the trust flag itself is only
/// mutable through `&mut self`.
#[derive(Debug)]
pub struct TransportHandle {
    config: TransportConfig,
    ignore_certificate_errors: bool,
    client: Mutex<Option<Client>>,
}

impl TransportHandle {
    /// Create an unbuilt handle with the secure trust default
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            ignore_certificate_errors: false,
            client: Mutex::new(None),
        }
    }

    /// True if TLS certificate and hostname validation is disabled
    pub fn ignore_certificate_errors(&self) -> bool {
        self.ignore_certificate_errors
    }

    /// Enable or disable the TLS certificate validation bypass
    ///
    /// Setting the current value is a no-op. Disabling restores the secure
    /// default. Enabling probe-builds a permissive client first; on failure
    /// the flag stays false and the error is returned, so the caller is
    /// never left on the secure transport while believing the bypass is
    /// active.
    pub fn set_ignore_certificate_errors(&mut self, ignore: bool) -> Result<()> {
        if self.ignore_certificate_errors == ignore {
            return Ok(());
        }

        if !ignore {
            debug!("restoring TLS certificate validation");
            self.ignore_certificate_errors = false;
            self.invalidate();
            return Ok(());
        }

        let probe = self.build_client(true).map(drop);
        self.apply_insecure_probe(probe)
    }

    // The probe outcome is separated from the state transition so the revert
    // path stays testable without forcing a TLS provider failure.
    fn apply_insecure_probe(&mut self, probe: Result<()>) -> Result<()> {
        self.invalidate();
        match probe {
            Ok(()) => {
                warn!("TLS certificate validation disabled");
                self.ignore_certificate_errors = true;
                Ok(())
            },
            Err(e) => {
                self.ignore_certificate_errors = false;
                Err(e)
            },
        }
    }

    /// Get the cached client, building it on first use
    pub fn client(&self) -> Result<Client> {
        let mut cached = self.client.lock().expect("transport cache lock poisoned");
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }

        let client = self.build_client(self.ignore_certificate_errors)?;
        *cached = Some(client.clone());
        Ok(client)
    }

    /// Drop the cached client; the next request rebuilds it
    pub fn invalidate(&self) {
        let mut cached = self.client.lock().expect("transport cache lock poisoned");
        *cached = None;
    }

    fn build_client(&self, insecure: bool) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .redirect(Policy::limited(10));

        if insecure {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
            builder.build().map_err(ClientError::TlsSetup)
        } else {
            builder.build().map_err(ClientError::Http)
        }
    }

    #[cfg(test)]
    fn is_built(&self) -> bool {
        self.client.lock().unwrap().is_some()
    }
}
