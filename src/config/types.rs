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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::ssh::client::DEFAULT_SSH_PORT;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub fabric: FabricConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

/// Fabric manager host and credentials.
///
/// `ip_address`, `username` and `ssh_key` are required, but may come from
/// the environment, so they stay optional until
/// [`Config::connection_params`] is called.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FabricConfig {
    pub ip_address: Option<String>,
    pub username: Option<String>,
    /// Path to the private key. `~/` is expanded.
    pub ssh_key: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// When set, the host key must be listed in this file.
    pub known_hosts: Option<String>,
    /// Seconds.
    pub connect_timeout: Option<u64>,
    /// Seconds.
    pub command_timeout: Option<u64>,
}

impl Default for FabricConfig {
    fn default() -> Self {
        Self {
            ip_address: None,
            username: None,
            ssh_key: None,
            port: default_port(),
            known_hosts: None,
            connect_timeout: None,
            command_timeout: None,
        }
    }
}

/// Serialization of full syncs across control-plane instances.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub lock_file: Option<String>,
    /// Seconds to wait for the lock.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lock_file: None,
            lock_timeout: default_lock_timeout(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_lock_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let yaml = r#"
fabric:
  ip_address: 10.0.0.5
  username: root
  ssh_key: ~/.ssh/id_rsa
  port: 2222
  known_hosts: /etc/fabric-agent/known_hosts
  connect_timeout: 10
sync:
  lock_file: /run/fabric-agent/sync.lock
  lock_timeout: 5
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fabric.ip_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.fabric.port, 2222);
        assert_eq!(config.fabric.connect_timeout, Some(10));
        assert_eq!(config.fabric.command_timeout, None);
        assert_eq!(config.sync.lock_timeout, 5);
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config: Config = serde_yaml::from_str("fabric:\n  username: admin\n").unwrap();
        assert_eq!(config.fabric.port, 22);
        assert!(config.fabric.known_hosts.is_none());
        assert!(config.sync.lock_file.is_none());
        assert_eq!(config.sync.lock_timeout, 30);
    }
}
