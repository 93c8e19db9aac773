use crate::canonical::{self, SigningInput};
use crate::token::AuthToken;
use crate::Credential;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;
use jfsign_core::time::{now, DateTime};
use jfsign_core::utils::Redact;
use jfsign_core::{Context, Result, SignRequest, SigningRequest};
use log::debug;

/// RequestSigner that implements the console API token authorization.
///
/// The signed request carries `Authorization: base64(json(token))`, see
/// [`AuthToken`] and [`crate::canonical`] for the details.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: Option<&[u8]>,
        credential: &Self::Credential,
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        let signed = authorization(&signed_req, body, credential, now).map(|value| {
            signed_req.headers.insert(AUTHORIZATION, value);
        });

        // Give headers and uri back even if signing failed.
        signed_req.apply(req)?;
        signed
    }
}

fn authorization(
    req: &SigningRequest,
    body: Option<&[u8]>,
    cred: &Credential,
    now: DateTime,
) -> Result<HeaderValue> {
    let timestamp = now.timestamp();
    let path = req.path_percent_decoded();

    let input = SigningInput {
        timestamp,
        method: req.method.as_str(),
        path: &path,
        headers: &req.headers,
        query: &req.query,
        body,
    };
    let string_to_sign = input.string_to_sign()?;
    debug!("calculated string to sign: {string_to_sign:?}");
    debug!(
        "signing with access key {} and secret key {}",
        Redact::from(&cred.access_key),
        Redact::from(&cred.secret_key)
    );

    let signature = canonical::signature(&cred.secret_key, &string_to_sign);
    let token = AuthToken::new(&cred.access_key, timestamp, signature).encode()?;

    let mut value = HeaderValue::from_str(&token)?;
    // Set token value sensitive to avoid leaking.
    value.set_sensitive(true);
    Ok(value)
}
