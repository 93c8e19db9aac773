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

//! Canonical request of the console API.
//!
//! Both the client and the console rebuild this string independently, so every
//! byte of it is part of the protocol:
//!
//! ```text
//! Timestamp + "\n" +
//! Method + "\n" +
//! Path + "\n" +
//! CanonicalHeaders + "\n" +
//! CanonicalQuery + "\n" +
//! PayloadHash
//! ```
//!
//! Empty fields still keep their line.

use http::HeaderMap;
use jfsign_core::hash::{hex_hmac_sha256, hex_sha256};
use jfsign_core::{Error, Result};
use percent_encoding::utf8_percent_encode;

use crate::constants::{QUERY_ENCODE_SET, SIGNED_HEADERS};

/// Everything that takes part in a signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningInput<'a> {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// HTTP method, used as is.
    pub method: &'a str,
    /// Request path without query string.
    pub path: &'a str,
    /// Request headers, only [`SIGNED_HEADERS`] are read.
    pub headers: &'a HeaderMap,
    /// Query parameters, a key may repeat to carry multiple values.
    pub query: &'a [(String, String)],
    /// Request body. `None` means no body at all.
    pub body: Option<&'a [u8]>,
}

impl SigningInput<'_> {
    /// Build the string to sign.
    pub fn string_to_sign(&self) -> Result<String> {
        let headers = canonical_headers(self.headers)?;
        let query = canonical_query(self.query);
        let payload = payload_hash(self.body);

        Ok(format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.timestamp, self.method, self.path, headers, query, payload
        ))
    }

    /// Calculate the hex encoded signature with given secret key.
    pub fn signature(&self, secret_key: &str) -> Result<String> {
        let string_to_sign = self.string_to_sign()?;
        Ok(signature(secret_key, &string_to_sign))
    }
}

/// Hex encoded HMAC-SHA256 of the string to sign keyed by the secret key.
pub fn signature(secret_key: &str, string_to_sign: &str) -> String {
    hex_hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes())
}

/// Build the header block from [`SIGNED_HEADERS`].
///
/// ```shell
/// Host: juicefs.com => "host:juicefs.com"
/// ```
pub fn canonical_headers(headers: &HeaderMap) -> Result<String> {
    canonical_headers_of(headers, SIGNED_HEADERS)
}

fn canonical_headers_of(headers: &HeaderMap, names: &[&str]) -> Result<String> {
    let mut s = String::with_capacity(32);

    for (idx, name) in names.iter().enumerate() {
        let value = match headers.get(*name) {
            Some(v) => v.to_str()?,
            None => "",
        };
        if value.is_empty() {
            return Err(Error::missing_header(name));
        }

        if idx != 0 {
            s.push('\n');
        }
        s.push_str(&name.to_ascii_lowercase());
        s.push(':');
        s.push_str(value);
    }

    Ok(s)
}

/// Build the query block.
///
/// Pairs are sorted by name then by value before escaping.
///
/// ```shell
/// [(b, 3), (a, 2), (a, 1)] => "a=1&a=2&b=3"
/// ```
pub fn canonical_query(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(&str, &str)> = query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.sort_unstable();

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(&query_escape(k));
        s.push('=');
        s.push_str(&query_escape(v));
    }

    s
}

/// Escape a query name or value, space becomes `+`.
pub fn query_escape(v: &str) -> String {
    let escaped = utf8_percent_encode(v, &QUERY_ENCODE_SET).to_string();
    // A literal "%20" in the input has its '%' escaped, so this only hits spaces.
    escaped.replace("%20", "+")
}

/// Hex encoded SHA-256 of the body, or empty if there is no body.
pub fn payload_hash(body: Option<&[u8]>) -> String {
    body.map(hex_sha256).unwrap_or_default()
}
