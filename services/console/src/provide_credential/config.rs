use async_trait::async_trait;
use jfsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider will load credential from config.
///
/// Only the values set on the config are used, env is left to
/// [`crate::EnvCredentialProvider`].
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new loader via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        if let (Some(ak), Some(sk)) = (&self.config.access_key, &self.config.secret_key) {
            return Ok(Some(Credential::new(ak, sk)));
        }

        Ok(None)
    }
}
