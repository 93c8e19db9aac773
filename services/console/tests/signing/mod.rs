mod standard;

use http::header::HOST;
use http::request::Parts;
use http::{Method, Request};
use jfsign_console::{AuthToken, Credential, RequestSigner};
use jfsign_core::time::{from_timestamp, DateTime};
use jfsign_core::{Context, Signer};

pub const TIMESTAMP: i64 = 1700000000;

pub fn fixed_time() -> DateTime {
    from_timestamp(TIMESTAMP).expect("timestamp must be valid")
}

/// Build a signer that always signs at [`TIMESTAMP`].
pub fn init_signer() -> Signer<Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    Signer::new(
        Context::new(),
        Credential::new("AK1", "SK1"),
        RequestSigner::new().with_time(fixed_time()),
    )
}

/// Build request parts carrying a `Host` header taken from the uri.
pub fn request_parts(method: Method, uri: &str) -> Parts {
    let uri: http::Uri = uri.parse().expect("uri must be valid");
    let host = uri
        .authority()
        .expect("uri must have authority")
        .as_str()
        .to_string();

    let (parts, _) = Request::builder()
        .method(method)
        .uri(uri)
        .header(HOST, host)
        .body(())
        .expect("request must be valid")
        .into_parts();
    parts
}

/// Decode the token carried by a signed request.
pub fn token_of(parts: &Parts) -> AuthToken {
    let value = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .expect("authorization must be set")
        .to_str()
        .expect("authorization must be ascii");
    AuthToken::decode(value).expect("token must be decodable")
}
