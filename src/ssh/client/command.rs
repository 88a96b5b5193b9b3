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

use async_trait::async_trait;

use super::core::SshClient;
use super::result::CommandResult;
use crate::executor::CommandExecutor;
use crate::ssh::tokio_client::{Client, CommandExecutedResult, Error};

impl SshClient {
    /// Connect, run `command`, disconnect.
    ///
    /// One full connection lifecycle per call. The session is closed even
    /// when the command itself fails.
    pub async fn connect_and_execute(&self, command: &str) -> Result<CommandResult, Error> {
        let client = self.connect().await?;

        tracing::debug!("Command dispatched: {}", command);
        let result = self.execute_with_timeout(&client, command).await;

        if let Err(e) = client.disconnect().await {
            tracing::debug!("Disconnect from {} failed: {}", self.params.host, e);
        }

        let result = CommandResult::from_executed(&self.params.host, result?);
        log_command_result(command, &result);
        Ok(result)
    }

    async fn execute_with_timeout(
        &self,
        client: &Client,
        command: &str,
    ) -> Result<CommandExecutedResult, Error> {
        match self.params.command_timeout {
            Some(timeout) => {
                tracing::debug!(
                    "Executing command with timeout of {} seconds",
                    timeout.as_secs()
                );
                tokio::time::timeout(timeout, client.execute(command))
                    .await
                    .unwrap_or_else(|_| {
                        Err(Error::CommandTimeout {
                            command: command.to_string(),
                            timeout,
                        })
                    })
            }
            None => client.execute(command).await,
        }
    }
}

fn log_command_result(command: &str, result: &CommandResult) {
    tracing::debug!(
        "Command '{}' on {} completed with status: {}",
        command,
        result.host,
        result.exit_status
    );

    let stdout = result.stdout_string();
    if !stdout.trim().is_empty() {
        tracing::debug!("stdout of '{}': {}", command, stdout.trim_end());
    }

    // opafmvf explains rejected changes on stderr.
    let stderr = result.stderr_string();
    if !stderr.trim().is_empty() {
        if result.is_success() {
            tracing::debug!("stderr of '{}': {}", command, stderr.trim_end());
        } else {
            tracing::warn!(
                "'{}' failed on {} with status {}: {}",
                command,
                result.host,
                result.exit_status,
                stderr.trim_end()
            );
        }
    }
}

#[async_trait]
impl CommandExecutor for SshClient {
    async fn execute_command(&self, command: &str) -> Result<u32, Error> {
        self.connect_and_execute(command)
            .await
            .map(|result| result.exit_status)
    }
}
