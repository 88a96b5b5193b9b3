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

//! Full sync sequencing against a recording executor.

mod common;

use std::time::Duration;

use common::RecordingExecutor;
use fabric_agent::fabric::{
    FabricAgentClient, FabricError, PartitionMembership, PortStatus, SyncLock,
};
use tempfile::TempDir;

fn membership() -> PartitionMembership {
    [
        ("compute", vec!["0x0011750101671ed9", "0x0011750101671eda"]),
        ("storage", vec!["0x0011750101671edb"]),
        ("mgmt", vec![]),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_successful_sync_reports_down() {
    let executor = RecordingExecutor::new();
    let client = FabricAgentClient::new(&executor);

    let status = client.full_sync(&membership()).await.unwrap();

    assert_eq!(status, PortStatus::Down);
    assert_eq!(
        executor.commands(),
        [
            "opafmvf add compute 0x0011750101671ed9 0x0011750101671eda",
            "opafmvf add storage 0x0011750101671edb",
            "opafmvf add mgmt",
            "opafmvf commit -f",
            "opafmvf reload",
        ]
    );
}

#[tokio::test]
async fn test_empty_membership_still_commits_and_reloads() {
    let executor = RecordingExecutor::new();
    let client = FabricAgentClient::new(&executor);

    let status = client
        .full_sync(&PartitionMembership::new())
        .await
        .unwrap();

    assert_eq!(status, PortStatus::Down);
    assert_eq!(executor.commands(), ["opafmvf commit -f", "opafmvf reload"]);
}

#[tokio::test]
async fn test_add_config_failure_aborts_sync() {
    let executor = RecordingExecutor::new().respond("opafmvf add storage", 2);
    let client = FabricAgentClient::new(&executor);

    let status = client.full_sync(&membership()).await.unwrap();

    assert_eq!(status, PortStatus::Error);
    assert_eq!(
        executor.commands(),
        [
            "opafmvf add compute 0x0011750101671ed9 0x0011750101671eda",
            "opafmvf add storage 0x0011750101671edb",
        ]
    );
}

#[tokio::test]
async fn test_other_add_failures_do_not_abort() {
    let executor = RecordingExecutor::new()
        .respond("opafmvf add compute", 1)
        .respond("opafmvf add mgmt", 137);
    let client = FabricAgentClient::new(&executor);

    let status = client.full_sync(&membership()).await.unwrap();

    assert_eq!(status, PortStatus::Down);
    assert_eq!(executor.commands().len(), 5);
}

#[tokio::test]
async fn test_commit_failure_skips_reload() {
    let executor = RecordingExecutor::new().respond("opafmvf commit", 1);
    let client = FabricAgentClient::new(&executor);

    let status = client.full_sync(&membership()).await.unwrap();

    assert_eq!(status, PortStatus::Error);
    let commands = executor.commands();
    assert_eq!(commands.last().map(String::as_str), Some("opafmvf commit -f"));
    assert!(!commands.iter().any(|c| c == "opafmvf reload"));
}

#[tokio::test]
async fn test_reload_failure_reports_error() {
    for code in [1, 2] {
        let executor = RecordingExecutor::new().respond("opafmvf reload", code);
        let client = FabricAgentClient::new(&executor);

        let status = client.full_sync(&membership()).await.unwrap();
        assert_eq!(status, PortStatus::Error);
        assert_eq!(executor.commands().len(), 5);
    }
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let executor = RecordingExecutor::new().unreachable_on("opafmvf commit");
    let client = FabricAgentClient::new(&executor);

    let err = client.full_sync(&membership()).await.unwrap_err();

    assert!(matches!(err, FabricError::Transport(_)));
    assert!(!executor.commands().iter().any(|c| c == "opafmvf reload"));
}

#[tokio::test]
async fn test_sync_lock_is_released_between_syncs() {
    let temp_dir = TempDir::new().unwrap();
    let lock = SyncLock::new(temp_dir.path().join("sync.lock"), Duration::from_millis(200));
    let executor = RecordingExecutor::new();
    let client = FabricAgentClient::new(&executor).with_sync_lock(Some(lock));

    assert_eq!(client.full_sync(&membership()).await.unwrap(), PortStatus::Down);
    assert_eq!(client.full_sync(&membership()).await.unwrap(), PortStatus::Down);
    assert_eq!(executor.commands().len(), 10);
}

#[tokio::test]
async fn test_held_sync_lock_blocks_fabric_commands() {
    let temp_dir = TempDir::new().unwrap();
    let lock = SyncLock::new(temp_dir.path().join("sync.lock"), Duration::from_millis(150));
    let _held = lock.acquire().await.unwrap();

    let executor = RecordingExecutor::new();
    let client = FabricAgentClient::new(&executor).with_sync_lock(Some(lock));

    let err = client.full_sync(&membership()).await.unwrap_err();

    assert!(matches!(err, FabricError::LockTimeout { .. }));
    assert!(executor.commands().is_empty());
}
