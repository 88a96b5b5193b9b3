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

//! Error types for fabric command building and orchestration

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::ssh::tokio_client;

/// Which builder rejected a sub-command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFamily {
    Configuration,
    Query,
    Management,
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandFamily::Configuration => "configuration",
            CommandFamily::Query => "query",
            CommandFamily::Management => "management",
        })
    }
}

/// Errors that can occur while driving the fabric manager
#[derive(Debug, Error)]
pub enum FabricError {
    /// Sub-command name outside the fixed vocabulary of its family
    #[error("{command} not supported in opafmvf CLI ({family} commands)")]
    UnknownCommand {
        family: CommandFamily,
        command: String,
    },

    /// Connecting to or running a command on the fabric manager host failed
    #[error(transparent)]
    Transport(#[from] tokio_client::Error),

    /// The sync lock file could not be opened or locked
    #[error("failed to lock '{}': {reason}", .path.display())]
    Lock { path: PathBuf, reason: String },

    /// Another process held the sync lock for the whole wait
    #[error("timed out after {}s waiting for sync lock '{}'", .timeout.as_secs(), .path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },
}
