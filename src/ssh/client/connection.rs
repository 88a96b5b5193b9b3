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

use super::core::SshClient;
use crate::ssh::tokio_client::{Client, Error};

impl SshClient {
    /// Open a fresh authenticated session to the fabric manager host.
    ///
    /// Any failure is logged here, where it happens, and then returned.
    pub async fn connect(&self) -> Result<Client, Error> {
        let params = &self.params;
        tracing::debug!(
            "Connecting to {}@{}:{}",
            params.username,
            params.host,
            params.port
        );

        let connect = Client::connect(
            &params.host,
            params.port,
            &params.username,
            params.auth_method(),
            params.server_check(),
        );

        let result = match params.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .unwrap_or_else(|_| {
                    Err(Error::ConnectTimeout {
                        host: params.host.clone(),
                        timeout,
                    })
                }),
            None => connect.await,
        };

        if let Err(e) = &result {
            let reason = match e {
                Error::KeyInvalid(key_err) => format!(
                    "failed to load SSH key {}: {key_err}",
                    params.key_path.display()
                ),
                Error::KeyAuthFailed => {
                    "the private key was rejected by the server".to_string()
                }
                Error::ServerCheckFailed => {
                    "host key verification failed against the configured known_hosts".to_string()
                }
                other => other.to_string(),
            };
            tracing::error!(
                "Error connecting to fabric manager at {}:{}: {}",
                params.host,
                params.port,
                reason
            );
        }

        result
    }
}
