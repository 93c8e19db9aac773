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

use std::future::Future;
use std::time::Duration;

use jfsign_core::{Error, Result};
use log::debug;

/// Poll a check with a fixed delay until it reports ready.
///
/// By default the poller retries forever with a one second interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    max_attempts: Option<u32>,
    interval: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            max_attempts: None,
            interval: Duration::from_secs(1),
        }
    }
}

impl Poller {
    /// Create a new poller with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up after `max_attempts` checks.
    ///
    /// The check always runs at least once, so `0` is treated as `1`.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts.max(1));
        self
    }

    /// Set the delay between two checks.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run `check` until it returns `Ok(true)`.
    ///
    /// `sleep` is awaited between two attempts with the configured interval.
    /// Errors returned by `check` are returned as is without retry.
    pub async fn wait_until<F, Fut, S, SFut>(&self, mut check: F, sleep: S) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
        S: Fn(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            if check().await? {
                debug!("poller: ready after {attempt} attempts");
                return Ok(());
            }

            if let Some(max) = self.max_attempts {
                if attempt >= max {
                    return Err(Error::unexpected(format!(
                        "not ready after {attempt} attempts"
                    )));
                }
            }

            debug!("poller: not ready on attempt {attempt}, sleep {:?}", self.interval);
            sleep(self.interval).await;
        }
    }
}
