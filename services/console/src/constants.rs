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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the console service.
pub const JUICEFS_CLOUD_ENDPOINT: &str = "JUICEFS_CLOUD_ENDPOINT";
pub const JUICEFS_CLOUD_ACCESS_KEY: &str = "JUICEFS_CLOUD_ACCESS_KEY";
pub const JUICEFS_CLOUD_SECRET_KEY: &str = "JUICEFS_CLOUD_SECRET_KEY";

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://juicefs.com/api/v1";

/// Version carried in every auth token.
pub const AUTH_TOKEN_VERSION: u32 = 1;

/// Headers that take part in the canonical request, in declared order.
///
/// The order is part of the protocol and must not be sorted.
pub const SIGNED_HEADERS: &[&str] = &["Host"];

/// AsciiSet for query escaping in the canonical request.
///
/// - Escape every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is escaped as `%20` here and rewritten to `+` afterwards.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
