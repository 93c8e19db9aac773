use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is resolved once and never changes for the lifetime of the
/// signer, so a `Signer` can be cloned and shared freely across tasks.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    credential: Arc<K>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer with a credential that is already known.
    pub fn new(ctx: Context, credential: K, builder: impl SignRequest<Credential = K>) -> Self {
        Self {
            ctx,
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        }
    }

    /// Create a new signer by loading the credential from the given provider.
    ///
    /// Returns [`crate::ErrorKind::CredentialInvalid`] if the provider has no
    /// credential or the loaded one is not valid.
    pub async fn load(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        let credential = loader
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found"))?;
        if !credential.is_valid() {
            return Err(Error::credential_invalid("loaded credential is not valid"));
        }

        Ok(Self::new(ctx, credential, builder))
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts, body: Option<&[u8]>) -> Result<()> {
        self.builder
            .sign_request(&self.ctx, req, body, &self.credential)
            .await
    }
}
