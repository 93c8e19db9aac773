use super::*;
use http::header::AUTHORIZATION;
use jfsign_console::canonical;
use jfsign_core::ErrorKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[tokio::test]
async fn test_sign_get_regions() -> anyhow::Result<()> {
    let signer = init_signer();
    let mut parts = request_parts(Method::GET, "https://juicefs.com/api/v1/regions");

    signer.sign(&mut parts, None).await?;

    assert_eq!(
        parts.headers[AUTHORIZATION],
        "eyJhY2Nlc3Nfa2V5IjoiQUsxIiwidGltZXN0YW1wIjoxNzAwMDAwMDAwLCJzaWduYXR1cmUiOiI4ODlhOTljZmFmNDQwMjRkNmU4OWI3ZGZlYWUyODE0Nzg1ZWVlNTdkY2ZhMjk4ZmJiOTg0NjBmYmQ4NzM1MGY0IiwidmVyc2lvbiI6MX0="
    );
    assert!(parts.headers[AUTHORIZATION].is_sensitive());
    Ok(())
}

#[test_case(
    Method::GET, "https://juicefs.com/api/v1/volumes?b=x+y%2Fz&a=2&a=1", None,
    "e29061480ba5a08bae5635459bdc02ef458b9c2ed0ac50d32b9cd61be9f202f0";
    "query is sorted and escaped"
)]
#[test_case(
    Method::POST, "https://juicefs.com/api/v1/volumes", Some(br#"{"name":"demo","region":1}"#.as_slice()),
    "23e1a3429f86036e34d4e4ecfa12f47b9b6e74461f6d804924946788b6536082";
    "body is hashed"
)]
#[test_case(
    Method::GET, "https://juicefs.com/api/v1/volumes/a%20b", None,
    "0bc57addea5c1b46bed6ba89fb517c4e8d010073329078cf75f296abb5474a9b";
    "path is percent decoded"
)]
#[test_case(
    Method::DELETE, "https://juicefs.com:8443/api/v1/volumes/7", None,
    "5ac7c2c9f357aee3fdff9d5a5c55120ebca93f6e8f7d1eeda36d059ded40694b";
    "host keeps port"
)]
#[tokio::test]
async fn test_sign_vectors(method: Method, uri: &str, body: Option<&[u8]>, expected: &str) {
    let signer = init_signer();
    let mut parts = request_parts(method, uri);

    signer
        .sign(&mut parts, body)
        .await
        .expect("sign must succeed");

    let token = token_of(&parts);
    assert_eq!(token.access_key, "AK1");
    assert_eq!(token.timestamp, TIMESTAMP);
    assert_eq!(token.version, 1);
    assert_eq!(token.signature, expected);
}

#[tokio::test]
async fn test_sign_keeps_request_intact() -> anyhow::Result<()> {
    let signer = init_signer();
    let uri = "https://juicefs.com/api/v1/volumes?b=x+y%2Fz&a=2&a=1";
    let mut parts = request_parts(Method::GET, uri);

    signer.sign(&mut parts, None).await?;

    assert_eq!(parts.uri.to_string(), uri);
    assert_eq!(parts.headers[http::header::HOST], "juicefs.com");
    assert_eq!(parts.headers.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_sign_is_deterministic() -> anyhow::Result<()> {
    let signer = init_signer();

    let mut first = request_parts(Method::GET, "https://juicefs.com/api/v1/clouds");
    let mut second = request_parts(Method::GET, "https://juicefs.com/api/v1/clouds");
    signer.sign(&mut first, Some(b"".as_slice())).await?;
    signer.sign(&mut second, Some(b"".as_slice())).await?;

    assert_eq!(token_of(&first), token_of(&second));
    Ok(())
}

#[tokio::test]
async fn test_sign_without_host() {
    let signer = init_signer();
    let mut parts = request_parts(Method::GET, "https://juicefs.com/api/v1/regions");
    parts.headers.clear();

    let err = signer
        .sign(&mut parts, None)
        .await
        .expect_err("sign must fail without host");

    assert_eq!(err.kind(), ErrorKind::MissingHeader);
    assert!(err.to_string().contains("Host"), "{err}");
    assert!(!parts.headers.contains_key(AUTHORIZATION));
}

#[tokio::test]
async fn test_signature_matches_canonical_helpers() -> anyhow::Result<()> {
    let signer = init_signer();
    let mut parts = request_parts(Method::PUT, "https://juicefs.com/api/v1/volumes/7?x=1");

    signer.sign(&mut parts, Some(b"{}".as_slice())).await?;

    let sts = format!(
        "{TIMESTAMP}\nPUT\n/api/v1/volumes/7\nhost:juicefs.com\nx=1\n{}",
        canonical::payload_hash(Some(b"{}".as_slice()))
    );
    assert_eq!(token_of(&parts).signature, canonical::signature("SK1", &sts));
    Ok(())
}
