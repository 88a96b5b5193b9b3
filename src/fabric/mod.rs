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

//! OmniPath virtual fabric management through the `opafmvf` CLI.
//!
//! - [`FabricAgentCli`] builds and issues individual opafmvf commands.
//! - [`FabricAgentClient`] sequences them into the two operations the
//!   control plane needs: a full membership sync and a port status query.

mod builders;
mod client;
mod command;
mod error;
mod exit_status;
mod lock;
mod membership;

pub use builders::FabricAgentCli;
pub use client::{FabricAgentClient, PortStatus};
pub use command::{
    COMMIT_FORCE_FLAG, CommandLine, ConfigCommand, ManagementCommand, OPA_BINARY, QueryCommand,
};
pub use error::{CommandFamily, FabricError};
pub use exit_status::{CONFIG_FAILURE_CODE, ExitStatus};
pub use lock::{DEFAULT_LOCK_TIMEOUT, SyncLock, SyncLockGuard};
pub use membership::PartitionMembership;
