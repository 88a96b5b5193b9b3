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

//! The `opafmvf` command vocabulary and command line assembly.
//!
//! Three families of sub-commands exist, each closed:
//!
//! | family        | sub-commands                                  |
//! |---------------|-----------------------------------------------|
//! | configuration | `create`, `delete`, `add`, `remove`           |
//! | query         | `exist`, `ismember`, `isnotmember`            |
//! | management    | `reset`, `commit`, `reload`, `restart`, `abort` |
//!
//! # Escaping
//!
//! Tokens are joined with single spaces and sent as one shell command
//! string. Nothing is quoted or escaped: partition names, pkeys and GUIDs
//! are trusted as-is. Callers must not pass untrusted input.

use std::fmt;
use std::str::FromStr;

use super::error::{CommandFamily, FabricError};

/// Name of the fabric manager virtual fabric CLI on the remote host.
pub const OPA_BINARY: &str = "opafmvf";

/// Flag appended to every `commit`.
pub const COMMIT_FORCE_FLAG: &str = "-f";

/// Partition configuration sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigCommand {
    Create,
    Delete,
    Add,
    Remove,
}

/// Read-only membership query sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryCommand {
    Exist,
    IsMember,
    IsNotMember,
}

/// Fabric manager lifecycle sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagementCommand {
    Reset,
    Commit,
    Reload,
    Restart,
    /// Force-kill the CLI process on the remote host.
    Abort,
}

impl ConfigCommand {
    pub const ALL: [ConfigCommand; 4] = [Self::Create, Self::Delete, Self::Add, Self::Remove];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigCommand::Create => "create",
            ConfigCommand::Delete => "delete",
            ConfigCommand::Add => "add",
            ConfigCommand::Remove => "remove",
        }
    }
}

impl QueryCommand {
    pub const ALL: [QueryCommand; 3] = [Self::Exist, Self::IsMember, Self::IsNotMember];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryCommand::Exist => "exist",
            QueryCommand::IsMember => "ismember",
            QueryCommand::IsNotMember => "isnotmember",
        }
    }
}

impl ManagementCommand {
    pub const ALL: [ManagementCommand; 5] = [
        Self::Reset,
        Self::Commit,
        Self::Reload,
        Self::Restart,
        Self::Abort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementCommand::Reset => "reset",
            ManagementCommand::Commit => "commit",
            ManagementCommand::Reload => "reload",
            ManagementCommand::Restart => "restart",
            ManagementCommand::Abort => "abort",
        }
    }
}

macro_rules! impl_command_parsing {
    ($ty:ty, $family:expr) => {
        impl FromStr for $ty {
            type Err = FabricError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|cmd| cmd.as_str() == s)
                    .ok_or_else(|| FabricError::UnknownCommand {
                        family: $family,
                        command: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_command_parsing!(ConfigCommand, CommandFamily::Configuration);
impl_command_parsing!(QueryCommand, CommandFamily::Query);
impl_command_parsing!(ManagementCommand, CommandFamily::Management);

/// One invocation of the remote CLI as an ordered list of tokens.
///
/// Built fresh for every call. [`Display`](fmt::Display) renders the exact
/// string sent over SSH.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// `opafmvf <create|delete|add|remove> <vf_name> [args...]`
    ///
    /// For `create`, the first argument is the partition key and becomes
    /// `--pkey <value>`; any further arguments are ignored. For `add` and
    /// `remove`, the arguments are member GUIDs. `delete` takes none.
    pub fn config<S: AsRef<str>>(command: ConfigCommand, vf_name: &str, args: &[S]) -> Self {
        let mut line = Self::new([OPA_BINARY, command.as_str(), vf_name]);
        match command {
            ConfigCommand::Create => {
                if let Some(pkey) = args.first() {
                    line.push(format!("--pkey {}", pkey.as_ref()));
                }
            }
            ConfigCommand::Delete => {}
            ConfigCommand::Add | ConfigCommand::Remove => line.push_joined(args),
        }
        line
    }

    /// `opafmvf <exist|ismember|isnotmember> <vf_name> [guids...]`
    pub fn query<S: AsRef<str>>(command: QueryCommand, vf_name: &str, guids: &[S]) -> Self {
        let mut line = Self::new([OPA_BINARY, command.as_str(), vf_name]);
        match command {
            QueryCommand::Exist => {}
            QueryCommand::IsMember | QueryCommand::IsNotMember => line.push_joined(guids),
        }
        line
    }

    /// `opafmvf <reset|commit -f|reload|restart>`, or `opafmvf killall -9 opafmvf`
    /// for `abort`.
    pub fn management(command: ManagementCommand) -> Self {
        match command {
            ManagementCommand::Commit => {
                Self::new([OPA_BINARY, command.as_str(), COMMIT_FORCE_FLAG])
            }
            ManagementCommand::Abort => Self::new([OPA_BINARY, "killall", "-9", OPA_BINARY]),
            _ => Self::new([OPA_BINARY, command.as_str()]),
        }
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Push `items` as one space-joined token. An empty list adds nothing.
    fn push_joined<S: AsRef<str>>(&mut self, items: &[S]) {
        if items.is_empty() {
            return;
        }
        let joined = items
            .iter()
            .map(|item| item.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.push(joined);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
