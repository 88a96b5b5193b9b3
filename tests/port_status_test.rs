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

//! Port status queries against a recording executor.

mod common;

use common::RecordingExecutor;
use fabric_agent::fabric::{FabricAgentClient, FabricError, PortStatus};

#[tokio::test]
async fn test_member_port_is_up() {
    let executor = RecordingExecutor::new();
    let client = FabricAgentClient::new(&executor);

    let status = client
        .get_port_status("compute", "0x0011750101671ed9")
        .await
        .unwrap();

    assert_eq!(status, PortStatus::Up);
    assert_eq!(
        executor.commands(),
        ["opafmvf ismember compute 0x0011750101671ed9"]
    );
}

#[tokio::test]
async fn test_non_zero_status_is_down() {
    for code in [1, 2, 255] {
        let executor = RecordingExecutor::new().respond("opafmvf ismember", code);
        let client = FabricAgentClient::new(&executor);

        let status = client.get_port_status("compute", "g1").await.unwrap();
        assert_eq!(status, PortStatus::Down, "exit code {code}");
    }
}

#[tokio::test]
async fn test_unreachable_fabric_manager_is_an_error() {
    let executor = RecordingExecutor::new().unreachable_on("opafmvf");
    let client = FabricAgentClient::new(&executor);

    let err = client.get_port_status("compute", "g1").await.unwrap_err();
    assert!(matches!(err, FabricError::Transport(_)));
}
