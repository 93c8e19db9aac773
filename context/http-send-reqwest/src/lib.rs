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

//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Timeouts, TLS and connection pooling are configured on the wrapped
//! [`reqwest::Client`]; this crate adds nothing on top of a single send.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use jfsign_core::{Error, HttpSend, Result};
use log::debug;
use reqwest::{Client, Request};

/// HttpSend implementation that sends requests with a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request into reqwest request").with_source(e)
        })?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        debug!("received response with status {}", parts.status);
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfsign_core::ErrorKind;

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let sender = ReqwestHttpSend::default();
        // Port 9 (discard) on localhost is expected to be closed.
        let req = http::Request::builder()
            .uri("http://127.0.0.1:9/api/v1/regions")
            .body(Bytes::new())
            .unwrap();

        let err = sender.http_send(req).await.expect_err("send must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
