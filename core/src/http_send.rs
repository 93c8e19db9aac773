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

use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to send the signed http request to the console API.
///
/// Implementations must be safe to share between tasks: a single sender is
/// used for every request issued by a client.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    ///
    /// Network level failures should be reported as [`crate::ErrorKind::Transport`].
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// NoopHttpSend is the sender used by a [`crate::Context`] that has not been configured.
#[derive(Debug, Copy, Clone)]
pub(crate) struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(crate::Error::transport(
            "http send is not configured, use Context::with_http_send",
        ))
    }
}
