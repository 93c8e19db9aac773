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

use serde::{Deserialize, Serialize};

use crate::constants::AUTH_TOKEN_VERSION;
use jfsign_core::hash::{base64_decode, base64_encode};
use jfsign_core::{Error, Result};

/// AuthToken is the value carried by the `Authorization` header.
///
/// It's encoded as base64 of the JSON object:
///
/// ```json
/// {"access_key":"...","timestamp":1700000000,"signature":"...","version":1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Access key of the credential that signed the request.
    pub access_key: String,
    /// Unix timestamp in seconds used in the string to sign.
    pub timestamp: i64,
    /// Hex encoded signature.
    pub signature: String,
    /// Token version, always [`AUTH_TOKEN_VERSION`].
    pub version: u32,
}

impl AuthToken {
    /// Create a new token of the current version.
    pub fn new(access_key: impl Into<String>, timestamp: i64, signature: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            timestamp,
            signature: signature.into(),
            version: AUTH_TOKEN_VERSION,
        }
    }

    /// Encode token into the header value.
    pub fn encode(&self) -> Result<String> {
        let bs = serde_json::to_vec(self)
            .map_err(|e| Error::serialization("failed to encode auth token").with_source(e))?;
        Ok(base64_encode(&bs))
    }

    /// Decode token from the header value.
    pub fn decode(value: &str) -> Result<Self> {
        let bs = base64_decode(value)?;
        serde_json::from_slice(&bs)
            .map_err(|e| Error::serialization("failed to decode auth token").with_source(e))
    }
}
