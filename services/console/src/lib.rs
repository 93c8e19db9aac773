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

//! JuiceFS Cloud console API signer and client.
//!
//! Every request sent to the console carries an `Authorization` header built
//! from an HMAC-SHA256 signature over a canonical form of the request.
//!
//! ```no_run
//! use jfsign_console::{Client, Config, Poller, CreateVolumeRequest};
//! use jfsign_core::{Context, OsEnv, Result};
//! use jfsign_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::from_config(ctx, Config::default()).await?;
//!
//! let volume = client.create_volume(&CreateVolumeRequest::new("demo", 1)).await?;
//! let volume = client.wait_volume_ready(volume.id, &Poller::new()).await?;
//! println!("volume {} is ready", volume.name);
//! # Ok(())
//! # }
//! ```

mod constants;

pub mod canonical;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod token;
pub use token::AuthToken;

mod sign_request;
pub use sign_request::RequestSigner;

mod client;
pub use client::Client;

mod api;
pub use api::Cloud;
pub use api::CreateVolumeRequest;
pub use api::Region;
pub use api::Volume;
pub use api::VolumeAccessRule;

mod poll;
pub use poll::Poller;

mod provide_credential;
pub use provide_credential::*;

#[cfg(test)]
mod mock;
