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

//! Typed console API built on top of [`Client::execute`].
//!
//! Each operation owns its expected status codes, anything else is reported
//! as [`jfsign_core::ErrorKind::UnexpectedStatus`].

use http::{Method, StatusCode};
use jfsign_core::time::DateTime;
use jfsign_core::{Error, ErrorKind, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::poll::Poller;
use crate::Client;

/// Cloud provider supported by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    /// Cloud id.
    pub id: i64,
    /// Cloud name, e.g. `aws`.
    pub name: String,
    /// Default object storage type of this cloud.
    pub storage: String,
}

/// Region of a cloud provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region id.
    pub id: i64,
    /// Id of the cloud this region belongs to.
    pub cloud: i64,
    /// Region name, e.g. `us-east-1`.
    pub name: String,
    /// Human readable description.
    pub desp: String,
    /// Owner id.
    pub owner: i64,
    /// Access token of the region.
    pub token: String,
    /// Default trash retention in days.
    #[serde(rename = "trashtime")]
    pub trash_time: i64,
}

/// Access rule of a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAccessRule {
    /// Client ip range in CIDR notation.
    #[serde(rename = "iprange")]
    pub ip_range: String,
    /// Access token for clients in this range.
    pub token: String,
    /// Mount read only.
    #[serde(rename = "readonly")]
    pub read_only: bool,
    /// Mount append only.
    #[serde(rename = "appendonly")]
    pub append_only: bool,
}

/// Volume managed by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume id.
    pub id: i64,
    /// Access rules of the volume.
    #[serde(default)]
    pub access_rules: Vec<VolumeAccessRule>,
    /// Owner id.
    pub owner: i64,
    /// Used bytes.
    pub size: Option<i64>,
    /// Used inodes.
    pub inodes: Option<i64>,
    /// Creation time.
    pub created: DateTime,
    /// Volume uuid.
    pub uuid: String,
    /// Volume name.
    pub name: String,
    /// Id of the region hosting the volume.
    pub region: i64,
    /// Object storage bucket url.
    pub bucket: String,
    /// Trash retention in days.
    #[serde(rename = "trashtime")]
    pub trash_time: i64,
    /// Block size.
    #[serde(rename = "blockSize")]
    pub block_size: i64,
    /// Compression algorithm.
    pub compress: String,
    /// Whether the volume runs in compatible mode.
    pub compatible: bool,
    /// Extended options.
    pub extend: Option<String>,
    /// Object storage type.
    pub storage: Option<String>,
}

/// Request body of [`Client::create_volume`].
///
/// Unset fields are left to the console defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateVolumeRequest {
    /// Volume name.
    pub name: String,
    /// Id of the region to create the volume in.
    pub region: i64,
    /// Object storage bucket url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Trash retention in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash_time: Option<i64>,
    /// Block size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<i64>,
    /// Compression algorithm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress: Option<String>,
    /// Enable compatible mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatible: Option<bool>,
    /// Extended options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend: Option<String>,
    /// Object storage type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

impl CreateVolumeRequest {
    /// Create a request with the required fields only.
    pub fn new(name: impl Into<String>, region: i64) -> Self {
        Self {
            name: name.into(),
            region,
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
struct VolumeReady {
    is_ready: bool,
}

/// Field errors returned by the console on validation failure.
#[derive(Deserialize)]
struct FieldErrors {
    #[serde(default)]
    name: Vec<String>,
}

impl Client {
    /// List all clouds.
    pub async fn list_clouds(&self) -> Result<Vec<Cloud>> {
        let (status, body) = self.execute(Method::GET, "/clouds", &[]).await?;
        expect_status("list clouds", status, &body, StatusCode::OK)?;
        decode(&body)
    }

    /// List all regions.
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let (status, body) = self.execute(Method::GET, "/regions", &[]).await?;
        expect_status("list regions", status, &body, StatusCode::OK)?;
        decode(&body)
    }

    /// List all volumes.
    pub async fn list_volumes(&self) -> Result<Vec<Volume>> {
        let (status, body) = self.execute(Method::GET, "/volumes", &[]).await?;
        expect_status("list volumes", status, &body, StatusCode::OK)?;
        decode(&body)
    }

    /// Create a volume.
    pub async fn create_volume(&self, req: &CreateVolumeRequest) -> Result<Volume> {
        let (status, body) = self
            .execute_json(Method::POST, "/volumes", &[], req)
            .await?;
        expect_status("create volume", status, &body, StatusCode::CREATED)?;
        decode(&body)
    }

    /// Get a volume by id, returns `None` if it doesn't exist.
    pub async fn get_volume(&self, id: i64) -> Result<Option<Volume>> {
        let (status, body) = self
            .execute(Method::GET, &format!("/volumes/{id}"), &[])
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        expect_status("get volume", status, &body, StatusCode::OK)?;
        decode(&body).map(Some)
    }

    /// Delete a volume by id.
    pub async fn delete_volume(&self, id: i64) -> Result<()> {
        let (status, body) = self
            .execute(Method::DELETE, &format!("/volumes/{id}"), &[])
            .await?;
        expect_status("delete volume", status, &body, StatusCode::NO_CONTENT)
    }

    /// Check whether a newly created volume is ready for use.
    pub async fn is_volume_ready(&self, id: i64) -> Result<bool> {
        let (status, body) = self
            .execute(Method::GET, &format!("/volumes/{id}/is_ready"), &[])
            .await?;
        expect_status("check volume ready", status, &body, StatusCode::OK)?;
        decode::<VolumeReady>(&body).map(|v| v.is_ready)
    }

    /// Poll [`Client::is_volume_ready`] until it returns true, then fetch the volume.
    pub async fn wait_volume_ready(&self, id: i64, poller: &Poller) -> Result<Volume> {
        poller
            .wait_until(move || self.is_volume_ready(id), tokio::time::sleep)
            .await?;

        self.get_volume(id)
            .await?
            .ok_or_else(|| Error::unexpected(format!("volume {id} disappeared after ready")))
    }
}

fn expect_status(op: &str, status: StatusCode, body: &[u8], expected: StatusCode) -> Result<()> {
    if status == expected {
        return Ok(());
    }

    debug!("failed to {op}: got status {status}");
    match serde_json::from_slice::<FieldErrors>(body) {
        Ok(errs) if !errs.name.is_empty() => Err(Error::new(
            ErrorKind::UnexpectedStatus,
            format!("failed to {op}: {}", errs.name.join("\n")),
        )),
        _ => Err(Error::unexpected_status(status, body)),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::serialization("failed to decode response body").with_source(e))
}
