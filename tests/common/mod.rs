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

//! Recording stand-in for the SSH executor.

use async_trait::async_trait;
use std::sync::Mutex;

use fabric_agent::executor::CommandExecutor;
use fabric_agent::ssh::tokio_client::Error;

/// Records every dispatched command and answers with scripted exit codes.
///
/// A command gets the code of the first rule whose prefix it starts with,
/// or 0 when no rule matches.
#[derive(Default)]
pub struct RecordingExecutor {
    commands: Mutex<Vec<String>>,
    rules: Vec<(String, u32)>,
    unreachable_from: Option<String>,
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, code: u32) -> Self {
        self.rules.push((prefix.to_string(), code));
        self
    }

    /// Fail with a transport error for commands starting with `prefix`.
    pub fn unreachable_on(mut self, prefix: &str) -> Self {
        self.unreachable_from = Some(prefix.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute_command(&self, command: &str) -> Result<u32, Error> {
        self.commands.lock().unwrap().push(command.to_string());

        if let Some(prefix) = &self.unreachable_from {
            if command.starts_with(prefix.as_str()) {
                return Err(Error::ServerCheckFailed);
            }
        }

        Ok(self
            .rules
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0))
    }
}
