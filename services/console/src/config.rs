use std::fmt::{Debug, Formatter};

use super::constants::*;
use jfsign_core::{utils::Redact, Context};

/// Config carries all the configuration for the console API.
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JUICEFS_CLOUD_ENDPOINT`]
    /// - default to [`DEFAULT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JUICEFS_CLOUD_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`JUICEFS_CLOUD_SECRET_KEY`]
    pub secret_key: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(JUICEFS_CLOUD_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JUICEFS_CLOUD_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(JUICEFS_CLOUD_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    /// Get the endpoint, falling back to [`DEFAULT_ENDPOINT`].
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .finish()
    }
}
