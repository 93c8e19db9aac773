use std::borrow::Cow;
use std::mem;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use std::str::FromStr;

use crate::{Error, Result};

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,

    /// Query string as it was on the wire, restored by `apply`.
    raw_query: Option<String>,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            raw_query: paq.query().map(str::to_string),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = match self.raw_query {
                    Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
                    _ => self.path,
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Cow<str> {
        percent_encoding::percent_decode_str(&self.path).decode_utf8_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HOST;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::builder()
            .method("GET")
            .uri(uri)
            .header(HOST, "juicefs.com")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[test]
    fn test_build_and_apply() {
        let mut p = parts("https://juicefs.com/api/v1/volumes%201?b=2&a=x+y&a=%2B");
        let req = SigningRequest::build(&mut p).expect("build must succeed");

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.authority.as_str(), "juicefs.com");
        assert_eq!(req.path, "/api/v1/volumes%201");
        assert_eq!(req.path_percent_decoded(), "/api/v1/volumes 1");
        assert_eq!(
            req.query,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "x y".to_string()),
                ("a".to_string(), "+".to_string()),
            ]
        );
        assert!(p.headers.is_empty());

        req.apply(&mut p).expect("apply must succeed");
        assert_eq!(
            p.uri.to_string(),
            "https://juicefs.com/api/v1/volumes%201?b=2&a=x+y&a=%2B"
        );
        assert_eq!(p.headers[HOST], "juicefs.com");
    }

    #[test]
    fn test_build_without_authority() {
        let mut p = parts("/api/v1/regions");
        let err = SigningRequest::build(&mut p).expect_err("must fail");
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
        assert_eq!(p.uri, "/api/v1/regions");
    }
}
