use crate::Credential;
use async_trait::async_trait;
use jfsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed access key and secret key.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with access key and secret key.
    pub fn new(access_key: &str, secret_key: &str) -> Self {
        Self {
            credential: Credential::new(access_key, secret_key),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
