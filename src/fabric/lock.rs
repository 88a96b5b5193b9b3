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

//! Single-writer lock around fabric-mutating syncs.
//!
//! Only one control-plane instance may run an add/commit/reload sequence at
//! a time, otherwise partition edits interleave. The lock is an advisory
//! `flock(2)` on a shared file, so it excludes processes on the same host
//! (or hosts sharing the lock file over a filesystem with working flock).

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::OpenOptions;
use tokio::time::Instant;

use super::error::FabricError;

/// Default time to wait for another sync to finish.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exclusive lock file shared by every process that may run a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncLock {
    path: PathBuf,
    timeout: Duration,
}

/// Held for the duration of one sync. Dropping it releases the lock.
pub struct SyncLockGuard {
    _lock: Flock<File>,
    path: PathBuf,
}

impl SyncLock {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the lock, polling until the timeout expires.
    pub async fn acquire(&self) -> Result<SyncLockGuard, FabricError> {
        let lock_error = |reason: String| FabricError::Lock {
            path: self.path.clone(),
            reason,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| lock_error(e.to_string()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .await
            .map_err(|e| lock_error(e.to_string()))?
            .into_std()
            .await;

        let deadline = Instant::now() + self.timeout;
        loop {
            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(lock) => {
                    tracing::debug!("Acquired sync lock {}", self.path.display());
                    return Ok(SyncLockGuard {
                        _lock: lock,
                        path: self.path.clone(),
                    });
                }
                Err((returned, errno)) if errno == Errno::EWOULDBLOCK => {
                    if Instant::now() >= deadline {
                        return Err(FabricError::LockTimeout {
                            path: self.path.clone(),
                            timeout: self.timeout,
                        });
                    }
                    file = returned;
                    tokio::time::sleep(LOCK_POLL_INTERVAL).await;
                }
                Err((_, errno)) => return Err(lock_error(errno.to_string())),
            }
        }
    }
}

impl std::fmt::Debug for SyncLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncLockGuard")
            .field("path", &self.path)
            .finish()
    }
}

impl Drop for SyncLockGuard {
    fn drop(&mut self) {
        tracing::debug!("Released sync lock {}", self.path.display());
    }
}
