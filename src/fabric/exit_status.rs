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

use std::fmt;

/// Exit code opafmvf uses for a rejected configuration change.
pub const CONFIG_FAILURE_CODE: u32 = 2;

/// Exit status of one opafmvf invocation.
///
/// `0` is success and `2` is the CLI's configuration failure. Every other
/// non-zero code is a generic failure and keeps its raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    Success,
    ConfigFailure,
    Failure(u32),
}

impl ExitStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => ExitStatus::Success,
            CONFIG_FAILURE_CODE => ExitStatus::ConfigFailure,
            other => ExitStatus::Failure(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::ConfigFailure => CONFIG_FAILURE_CODE,
            ExitStatus::Failure(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }
}

impl From<u32> for ExitStatus {
    fn from(code: u32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
