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

use std::path::PathBuf;
use std::time::Duration;

use crate::ssh::tokio_client::{AuthMethod, ServerCheckMethod};

/// Default SSH port of the fabric manager host.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Everything needed to reach the fabric manager host.
///
/// Immutable once built; every command opens its own connection from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub key_path: PathBuf,
    /// `None` accepts any host key.
    pub known_hosts: Option<PathBuf>,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
}

impl ConnectionParams {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            key_path: key_path.into(),
            known_hosts: None,
            connect_timeout: None,
            command_timeout: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_known_hosts(mut self, known_hosts: Option<PathBuf>) -> Self {
        self.known_hosts = known_hosts;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub(crate) fn auth_method(&self) -> AuthMethod {
        AuthMethod::with_key_file(&self.key_path, None)
    }

    pub(crate) fn server_check(&self) -> ServerCheckMethod {
        match &self.known_hosts {
            Some(path) => ServerCheckMethod::with_known_hosts_file(path),
            None => ServerCheckMethod::NoCheck,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ConnectionParams::new("10.0.0.5", "root", "/root/.ssh/id_rsa");
        assert_eq!(params.port, 22);
        assert!(params.known_hosts.is_none());
        assert!(params.connect_timeout.is_none());
        assert!(params.command_timeout.is_none());
        assert_eq!(params.server_check(), ServerCheckMethod::NoCheck);
    }

    #[test]
    fn test_known_hosts_switches_server_check() {
        let params = ConnectionParams::new("fm01", "admin", "/keys/fm")
            .with_known_hosts(Some(PathBuf::from("/etc/fabric/known_hosts")));
        assert_eq!(
            params.server_check(),
            ServerCheckMethod::KnownHostsFile(PathBuf::from("/etc/fabric/known_hosts"))
        );
    }

    #[test]
    fn test_auth_method_uses_key_path() {
        let params = ConnectionParams::new("fm01", "admin", "/keys/fm");
        assert_eq!(params.auth_method(), AuthMethod::with_key_file("/keys/fm", None));
    }
}
