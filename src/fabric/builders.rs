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

//! Categorized opafmvf command builders.
//!
//! Each builder comes in two shapes:
//! - typed (`config`, `query`, `management` and the per-command helpers),
//!   which cannot name an unknown sub-command;
//! - by name (`config_commands`, `query_commands`, `management_commands`),
//!   which validate the name against the family and, on an unknown name,
//!   log the error and yield `None` without running anything.
//!
//! Both delegate to the executor and hand back the remote exit status.

use std::fmt::Display;
use std::str::FromStr;

use super::command::{CommandLine, ConfigCommand, ManagementCommand, QueryCommand};
use super::error::FabricError;
use super::exit_status::ExitStatus;
use crate::executor::CommandExecutor;

/// Issues opafmvf commands through a [`CommandExecutor`].
#[derive(Debug, Clone)]
pub struct FabricAgentCli<E> {
    executor: E,
}

impl<E: CommandExecutor> FabricAgentCli<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    async fn run(&self, line: CommandLine) -> Result<ExitStatus, FabricError> {
        let command = line.to_string();
        let code = self.executor.execute_command(&command).await?;
        Ok(ExitStatus::from_code(code))
    }

    pub async fn config<S>(
        &self,
        command: ConfigCommand,
        vf_name: &str,
        args: &[S],
    ) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.run(CommandLine::config(command, vf_name, args)).await
    }

    pub async fn query<S>(
        &self,
        command: QueryCommand,
        vf_name: &str,
        guids: &[S],
    ) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.run(CommandLine::query(command, vf_name, guids)).await
    }

    pub async fn management(&self, command: ManagementCommand) -> Result<ExitStatus, FabricError> {
        self.run(CommandLine::management(command)).await
    }

    /// Configuration builder addressed by sub-command name.
    pub async fn config_commands<S>(
        &self,
        name: &str,
        vf_name: &str,
        args: &[S],
    ) -> Result<Option<ExitStatus>, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        let Some(command) = parse_or_log::<ConfigCommand>(name) else {
            return Ok(None);
        };
        self.config(command, vf_name, args).await.map(Some)
    }

    /// Query builder addressed by sub-command name.
    pub async fn query_commands<S>(
        &self,
        name: &str,
        vf_name: &str,
        guids: &[S],
    ) -> Result<Option<ExitStatus>, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        let Some(command) = parse_or_log::<QueryCommand>(name) else {
            return Ok(None);
        };
        self.query(command, vf_name, guids).await.map(Some)
    }

    /// Management builder addressed by sub-command name.
    pub async fn management_commands(
        &self,
        name: &str,
    ) -> Result<Option<ExitStatus>, FabricError> {
        let Some(command) = parse_or_log::<ManagementCommand>(name) else {
            return Ok(None);
        };
        self.management(command).await.map(Some)
    }

    pub async fn create(
        &self,
        vf_name: &str,
        pkey: impl Display,
    ) -> Result<ExitStatus, FabricError> {
        self.config(ConfigCommand::Create, vf_name, &[pkey.to_string()])
            .await
    }

    pub async fn delete(&self, vf_name: &str) -> Result<ExitStatus, FabricError> {
        self.config::<&str>(ConfigCommand::Delete, vf_name, &[]).await
    }

    pub async fn add<S>(&self, vf_name: &str, guids: &[S]) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.config(ConfigCommand::Add, vf_name, guids).await
    }

    pub async fn remove<S>(&self, vf_name: &str, guids: &[S]) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.config(ConfigCommand::Remove, vf_name, guids).await
    }

    pub async fn exist(&self, vf_name: &str) -> Result<ExitStatus, FabricError> {
        self.query::<&str>(QueryCommand::Exist, vf_name, &[]).await
    }

    pub async fn is_member<S>(&self, vf_name: &str, guids: &[S]) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.query(QueryCommand::IsMember, vf_name, guids).await
    }

    pub async fn is_not_member<S>(
        &self,
        vf_name: &str,
        guids: &[S],
    ) -> Result<ExitStatus, FabricError>
    where
        S: AsRef<str> + Sync,
    {
        self.query(QueryCommand::IsNotMember, vf_name, guids).await
    }

    pub async fn reset(&self) -> Result<ExitStatus, FabricError> {
        self.management(ManagementCommand::Reset).await
    }

    pub async fn commit(&self) -> Result<ExitStatus, FabricError> {
        self.management(ManagementCommand::Commit).await
    }

    pub async fn reload(&self) -> Result<ExitStatus, FabricError> {
        self.management(ManagementCommand::Reload).await
    }

    pub async fn restart(&self) -> Result<ExitStatus, FabricError> {
        self.management(ManagementCommand::Restart).await
    }

    pub async fn abort(&self) -> Result<ExitStatus, FabricError> {
        self.management(ManagementCommand::Abort).await
    }
}

fn parse_or_log<C>(name: &str) -> Option<C>
where
    C: FromStr<Err = FabricError>,
{
    match name.parse::<C>() {
        Ok(command) => Some(command),
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}
