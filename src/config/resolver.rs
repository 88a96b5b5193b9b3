// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolution of loaded configuration into runtime parameters.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::fabric::SyncLock;
use crate::ssh::ConnectionParams;

use super::loader::{ENV_IP_ADDRESS, ENV_SSH_KEY, ENV_USERNAME};
use super::types::Config;
use super::utils::expand_tilde;

fn required<'a>(value: &'a Option<String>, key: &str, env: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing required option fabric.{key} (or set {env})"))
}

impl Config {
    /// Connection parameters for the fabric manager host.
    pub fn connection_params(&self) -> Result<ConnectionParams> {
        let fabric = &self.fabric;
        let ip_address = required(&fabric.ip_address, "ip_address", ENV_IP_ADDRESS)?;
        let username = required(&fabric.username, "username", ENV_USERNAME)?;
        let ssh_key = required(&fabric.ssh_key, "ssh_key", ENV_SSH_KEY)?;

        tracing::info!("Fabric manager IP address: {}", ip_address);

        Ok(
            ConnectionParams::new(ip_address, username, expand_tilde(Path::new(ssh_key)))
                .with_port(fabric.port)
                .with_known_hosts(
                    fabric
                        .known_hosts
                        .as_deref()
                        .map(|p| expand_tilde(Path::new(p))),
                )
                .with_connect_timeout(fabric.connect_timeout.map(Duration::from_secs))
                .with_command_timeout(fabric.command_timeout.map(Duration::from_secs)),
        )
    }

    /// The sync lock, if one is configured.
    pub fn sync_lock(&self) -> Option<SyncLock> {
        self.sync.lock_file.as_deref().map(|path| {
            SyncLock::new(
                expand_tilde(Path::new(path)),
                Duration::from_secs(self.sync.lock_timeout),
            )
        })
    }
}
