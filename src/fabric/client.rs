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

//! Port binding operations requested by the network control plane.

use std::fmt;

use super::builders::FabricAgentCli;
use super::error::FabricError;
use super::exit_status::ExitStatus;
use super::lock::SyncLock;
use super::membership::PartitionMembership;
use crate::executor::CommandExecutor;

/// Bind status reported back to the control plane.
///
/// These three labels are the whole outcome vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortStatus {
    Up,
    Down,
    Error,
}

impl PortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortStatus::Up => "UP",
            PortStatus::Down => "DOWN",
            PortStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciles partition membership on the fabric manager.
#[derive(Debug, Clone)]
pub struct FabricAgentClient<E> {
    cli: FabricAgentCli<E>,
    sync_lock: Option<SyncLock>,
}

impl<E: CommandExecutor> FabricAgentClient<E> {
    pub fn new(executor: E) -> Self {
        Self {
            cli: FabricAgentCli::new(executor),
            sync_lock: None,
        }
    }

    /// Serialize [`full_sync`](Self::full_sync) calls through `lock`.
    pub fn with_sync_lock(mut self, lock: Option<SyncLock>) -> Self {
        self.sync_lock = lock;
        self
    }

    pub fn cli(&self) -> &FabricAgentCli<E> {
        &self.cli
    }

    /// Push the desired membership to the fabric and activate it.
    ///
    /// Issues one `add` per partition in order, then `commit -f`, then
    /// `reload`:
    /// - an `add` exiting with 2 stops the sync at once with `Error`;
    ///   any other `add` status is ignored
    /// - a non-zero `commit` or `reload` gives `Error`
    /// - otherwise the result is `Down`, since the port still has to
    ///   come back up after the reload
    ///
    /// Without a sync lock nothing stops another control-plane instance
    /// from interleaving its own sync with this one.
    pub async fn full_sync(
        &self,
        membership: &PartitionMembership,
    ) -> Result<PortStatus, FabricError> {
        let _guard = match &self.sync_lock {
            Some(lock) => Some(lock.acquire().await?),
            None => {
                tracing::debug!(
                    "No sync lock configured; concurrent syncs from other instances are not excluded"
                );
                None
            }
        };

        for (vf_name, guids) in membership.iter() {
            let status = self.cli.add(vf_name, guids).await?;
            if status == ExitStatus::ConfigFailure {
                tracing::warn!("Adding members to virtual fabric {} failed", vf_name);
                return Ok(PortStatus::Error);
            }
        }

        let commit_status = self.cli.commit().await?;
        if !commit_status.is_success() {
            tracing::warn!("Fabric commit failed with status {}", commit_status);
            return Ok(PortStatus::Error);
        }

        let reload_status = self.cli.reload().await?;
        if !reload_status.is_success() {
            tracing::warn!("Fabric reload failed with status {}", reload_status);
            return Ok(PortStatus::Error);
        }

        tracing::info!(
            "Full sync of {} virtual fabric(s) committed and reloaded",
            membership.len()
        );
        Ok(PortStatus::Down)
    }

    /// `Up` when `guid` is a member of `vf_name`, `Down` otherwise.
    pub async fn get_port_status(
        &self,
        vf_name: &str,
        guid: &str,
    ) -> Result<PortStatus, FabricError> {
        let status = self.cli.is_member(vf_name, &[guid]).await?;
        Ok(if status.is_success() {
            PortStatus::Up
        } else {
            PortStatus::Down
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_status_labels() {
        assert_eq!(PortStatus::Up.to_string(), "UP");
        assert_eq!(PortStatus::Down.to_string(), "DOWN");
        assert_eq!(PortStatus::Error.to_string(), "ERROR");
    }
}
