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

use crate::ssh::tokio_client::CommandExecutedResult;

/// Result of a remote command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub host: String,
    pub output: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_status: u32,
}

impl CommandResult {
    pub(super) fn from_executed(host: &str, executed: CommandExecutedResult) -> Self {
        Self {
            host: host.to_string(),
            output: executed.stdout.into_bytes(),
            stderr: executed.stderr.into_bytes(),
            exit_status: executed.exit_status,
        }
    }

    /// Convert stdout to a UTF-8 string
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.output).to_string()
    }

    /// Convert stderr to a UTF-8 string
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    pub fn is_success(&self) -> bool {
        self.exit_status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_executed_keeps_host_and_streams() {
        let executed = CommandExecutedResult {
            stdout: "vf1 exists\n".to_string(),
            stderr: "warning: stale lock\n".to_string(),
            exit_status: 1,
        };

        let result = CommandResult::from_executed("10.0.0.5", executed);

        assert_eq!(result.host, "10.0.0.5");
        assert_eq!(result.output, b"vf1 exists\n");
        assert_eq!(result.stderr_string(), "warning: stale lock\n");
        assert_eq!(result.exit_status, 1);
        assert!(!result.is_success());
    }

    #[test]
    fn test_command_result_success() {
        let result = CommandResult {
            host: "fm01".to_string(),
            output: b"vf1 exists\n".to_vec(),
            stderr: Vec::new(),
            exit_status: 0,
        };

        assert!(result.is_success());
        assert_eq!(result.stdout_string(), "vf1 exists\n");
        assert_eq!(result.stderr_string(), "");
    }

    #[test]
    fn test_command_result_config_failure() {
        let result = CommandResult {
            host: "fm01".to_string(),
            output: Vec::new(),
            stderr: b"Error: unknown virtual fabric\n".to_vec(),
            exit_status: 2,
        };

        assert!(!result.is_success());
        assert_eq!(result.stderr_string(), "Error: unknown virtual fabric\n");
    }
}
