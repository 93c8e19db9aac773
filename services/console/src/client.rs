// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::{Method, StatusCode, Uri};
use jfsign_core::utils::Redact;
use jfsign_core::{Context, Error, Result, Signer, SigningCredential};
use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::credential::Credential;
use crate::provide_credential::DefaultCredentialProvider;
use crate::sign_request::RequestSigner;

/// Client sends signed requests to the console API.
///
/// Every call is signed with a fresh timestamp and sent exactly once; status
/// codes are returned as is and never retried. `Client` is cheap to clone and
/// can be shared between tasks.
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: Arc<str>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client with a known credential.
    pub fn new(ctx: Context, endpoint: &str, credential: Credential) -> Result<Self> {
        Self::with_request_signer(ctx, endpoint, credential, RequestSigner::new())
    }

    /// Create a client with a known credential and a customized request signer.
    pub fn with_request_signer(
        ctx: Context,
        endpoint: &str,
        credential: Credential,
        signer: RequestSigner,
    ) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint)?;
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "access key and secret key must not be empty",
            ));
        }

        Ok(Self {
            endpoint: endpoint.into(),
            signer: Signer::new(ctx, credential, signer),
        })
    }

    /// Create a client from config, env values fill the unset fields.
    ///
    /// The credential is resolved once here and never reloaded.
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let endpoint = normalize_endpoint(config.endpoint())?;
        debug!("building console client with {config:?}");

        let loader = DefaultCredentialProvider::with_config(Arc::new(config));
        let signer = Signer::load(ctx, loader, RequestSigner::new()).await?;

        Ok(Self {
            endpoint: endpoint.into(),
            signer,
        })
    }

    /// Get the endpoint of this client, without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a signed request without body.
    ///
    /// `path` is relative to the endpoint and must start with `/`. A key may
    /// appear more than once in `query` to carry multiple values.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, Bytes)> {
        self.send(method, path, query, None).await
    }

    /// Send a signed request with `payload` encoded as JSON body.
    pub async fn execute_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: &T,
    ) -> Result<(StatusCode, Bytes)> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| Error::serialization("failed to encode request payload").with_source(e))?;
        self.send(method, path, query, Some(Bytes::from(body)))
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Bytes>,
    ) -> Result<(StatusCode, Bytes)> {
        let uri = self.build_uri(path, query)?;
        let host = uri
            .authority()
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| Error::request_invalid(format!("request uri {uri} has no host")))?;

        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(HOST, host);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let (mut parts, _) = builder.body(())?.into_parts();

        self.signer.sign(&mut parts, body.as_deref()).await?;
        let req = http::Request::from_parts(parts, body.unwrap_or_default());
        debug!("sending signed request: {} {}", req.method(), req.uri());

        let resp = self.signer.context().http_send(req).await?;
        let status = resp.status();
        debug!("{method} {path} responded with {status}");

        Ok((status, resp.into_body()))
    }

    fn build_uri(&self, path: &str, query: &[(&str, &str)]) -> Result<Uri> {
        if !path.starts_with('/') || path.contains(['?', '#']) {
            return Err(Error::request_invalid(format!(
                "path {path} must start with / and carry no query or fragment"
            )));
        }

        let mut s = format!("{}{}", self.endpoint, path);
        if !query.is_empty() {
            s.push('?');
            s.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish(),
            );
        }

        Uri::from_str(&s).map_err(|e| {
            Error::request_invalid(format!("invalid request uri {s}")).with_source(e)
        })
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim_end_matches('/');
    let uri = Uri::from_str(endpoint).map_err(|e| {
        Error::config_invalid(format!("invalid endpoint {endpoint}")).with_source(e)
    })?;
    // Userinfo would end up in the Host header and the string to sign.
    if uri.authority().is_some_and(|v| v.as_str().contains('@')) {
        return Err(Error::config_invalid(format!(
            "endpoint {} must not carry userinfo",
            Redact::from(endpoint)
        )));
    }
    if uri.scheme().is_none() || uri.authority().is_none() || uri.query().is_some() {
        return Err(Error::config_invalid(format!(
            "endpoint {endpoint} must be an absolute url without query"
        )));
    }

    Ok(endpoint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::mock::MockHttpSend;
    use crate::token::AuthToken;
    use http::header::AUTHORIZATION;
    use jfsign_core::time::from_timestamp;
    use jfsign_core::{ErrorKind, StaticEnv};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn client(mock: &MockHttpSend) -> Client {
        Client::with_request_signer(
            Context::new().with_http_send(mock.clone()),
            "https://juicefs.com/api/v1/",
            Credential::new("AK1", "SK1"),
            RequestSigner::new().with_time(from_timestamp(1700000000).unwrap()),
        )
        .expect("client must be valid")
    }

    #[tokio::test]
    async fn test_execute_regions() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock = MockHttpSend::default().respond(200, "[]");

        let (status, body) = client(&mock).execute(Method::GET, "/regions", &[]).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        let req = &sent[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.uri.to_string(), "https://juicefs.com/api/v1/regions");
        assert_eq!(req.headers[HOST], "juicefs.com");
        assert!(req.headers.get(CONTENT_TYPE).is_none());
        assert!(req.body.is_empty());

        let token = AuthToken::decode(req.headers[AUTHORIZATION].to_str()?)?;
        assert_eq!(
            token,
            AuthToken::new(
                "AK1",
                1700000000,
                "889a99cfaf44024d6e89b7dfeae2814785eee57dcfa298fbb98460fbd87350f4"
            )
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_json() -> anyhow::Result<()> {
        let mock = MockHttpSend::default().respond(201, "{}");

        #[derive(Serialize)]
        struct Payload {
            name: &'static str,
            region: i64,
        }

        let (status, _) = client(&mock)
            .execute_json(
                Method::POST,
                "/volumes",
                &[],
                &Payload {
                    name: "demo",
                    region: 1,
                },
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED);

        let req = &mock.requests()[0];
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert_eq!(req.body, r#"{"name":"demo","region":1}"#);
        let token = AuthToken::decode(req.headers[AUTHORIZATION].to_str()?)?;
        assert_eq!(
            token.signature,
            "23e1a3429f86036e34d4e4ecfa12f47b9b6e74461f6d804924946788b6536082"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_execute_with_query() -> anyhow::Result<()> {
        let mock = MockHttpSend::default().respond(200, "[]");

        client(&mock)
            .execute(
                Method::GET,
                "/volumes",
                &[("b", "x y/z"), ("a", "2"), ("a", "1")],
            )
            .await?;

        let req = &mock.requests()[0];
        assert_eq!(
            req.uri.to_string(),
            "https://juicefs.com/api/v1/volumes?b=x+y%2Fz&a=2&a=1"
        );
        let token = AuthToken::decode(req.headers[AUTHORIZATION].to_str()?)?;
        assert_eq!(
            token.signature,
            "e29061480ba5a08bae5635459bdc02ef458b9c2ed0ac50d32b9cd61be9f202f0"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_payload_is_signed_as_body() -> anyhow::Result<()> {
        let mock = MockHttpSend::default().respond(200, "").respond(200, "");
        let client = client(&mock);

        client.execute(Method::PUT, "/volumes/1", &[]).await?;
        client
            .execute_json(Method::PUT, "/volumes/1", &[], &serde_json::json!({}))
            .await?;

        let sent = mock.requests();
        assert!(sent[0].headers.get(CONTENT_TYPE).is_none());
        assert_eq!(sent[1].body, "{}");
        let without_body = AuthToken::decode(sent[0].headers[AUTHORIZATION].to_str()?)?;
        let with_body = AuthToken::decode(sent[1].headers[AUTHORIZATION].to_str()?)?;
        assert_ne!(without_body.signature, with_body.signature);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_are_signed_independently() -> anyhow::Result<()> {
        let mut mock = MockHttpSend::default();
        for _ in 0..8 {
            mock = mock.respond(200, "{}");
        }
        let client = client(&mock);

        let tasks: Vec<_> = (0..8)
            .map(|id| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .execute(Method::GET, &format!("/volumes/{id}"), &[])
                        .await
                })
            })
            .collect();
        for task in tasks {
            let (status, _) = task.await??;
            assert_eq!(status, StatusCode::OK);
        }

        let sent = mock.requests();
        assert_eq!(sent.len(), 8);
        let mut signatures = Vec::new();
        for req in &sent {
            let token = AuthToken::decode(req.headers[AUTHORIZATION].to_str()?)?;
            let sts = format!(
                "1700000000\nGET\n{}\nhost:juicefs.com\n\n",
                req.uri.path()
            );
            assert_eq!(token.signature, crate::canonical::signature("SK1", &sts));
            signatures.push(token.signature);
        }
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_is_not_interpreted() -> anyhow::Result<()> {
        let mock = MockHttpSend::default().respond(500, "oops");

        let (status, body) = client(&mock).execute(Method::GET, "/clouds", &[]).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "oops");

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error() {
        let mock = MockHttpSend::default();

        let err = client(&mock)
            .execute(Method::GET, "/regions", &[])
            .await
            .expect_err("send must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_path() {
        let mock = MockHttpSend::default();
        let client = client(&mock);

        for path in ["regions", "/regions?page=1", "/volumes#x", "/re gions"] {
            let err = client
                .execute(Method::GET, path, &[])
                .await
                .expect_err("path must be rejected");
            assert_eq!(err.kind(), ErrorKind::RequestInvalid, "path: {path}");
        }
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_invalid_endpoint_and_credential() {
        for endpoint in [
            "juicefs.com/api/v1",
            "https://juicefs.com/api?a=1",
            "https://user:pw@juicefs.com/api/v1",
            "",
        ] {
            let err = Client::new(Context::new(), endpoint, Credential::new("AK1", "SK1"))
                .expect_err("endpoint must be rejected");
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "endpoint: {endpoint}");
        }

        let err = Client::new(
            Context::new(),
            "https://user:pw@juicefs.com/api/v1",
            Credential::new("AK1", "SK1"),
        )
        .expect_err("userinfo must be rejected");
        assert!(!err.to_string().contains("pw@"), "{err}");

        let err = Client::new(Context::new(), DEFAULT_ENDPOINT, Credential::new("AK1", ""))
            .expect_err("credential must be rejected");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_from_config() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (JUICEFS_CLOUD_ACCESS_KEY.to_string(), "env_ak".to_string()),
                (JUICEFS_CLOUD_SECRET_KEY.to_string(), "env_sk".to_string()),
            ]),
        });

        let client = Client::from_config(ctx.clone(), Config::new()).await?;
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);

        let client = Client::from_config(
            ctx,
            Config::new().with_endpoint("http://127.0.0.1:8080/api/v1/"),
        )
        .await?;
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/api/v1");

        let err = Client::from_config(Context::new(), Config::new())
            .await
            .expect_err("credential is missing");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

        Ok(())
    }
}
