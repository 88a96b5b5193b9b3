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

//! Remote command execution seam.
//!
//! The fabric orchestration layer only needs "run this command line on the
//! fabric manager host and give me its exit status". [`SshClient`] is the
//! production implementation; tests plug in a recording fake.
//!
//! [`SshClient`]: crate::ssh::SshClient

use async_trait::async_trait;

use crate::ssh::tokio_client::Error;

/// Runs one command to completion on the fabric manager host.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Dispatch `command` verbatim and return the remote exit status.
    ///
    /// Implementations must not reuse state between calls: each call is
    /// independent and calls are issued strictly in sequence.
    async fn execute_command(&self, command: &str) -> Result<u32, Error>;
}

#[async_trait]
impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    async fn execute_command(&self, command: &str) -> Result<u32, Error> {
        (**self).execute_command(command).await
    }
}

#[async_trait]
impl<T: CommandExecutor + ?Sized> CommandExecutor for Box<T> {
    async fn execute_command(&self, command: &str) -> Result<u32, Error> {
        (**self).execute_command(command).await
    }
}
