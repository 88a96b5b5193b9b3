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

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use fabric_agent::{
    cli::{Cli, Commands},
    config::Config,
    fabric::{ExitStatus, FabricAgentClient, PartitionMembership, PortStatus},
    ssh::SshClient,
    utils::init_logging,
};

/// Exit code for a sub-command name opafmvf does not know (EX_USAGE).
const UNKNOWN_COMMAND_EXIT: u8 = 64;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_with_priority(cli.config.as_deref()).await?;
    let params = config
        .connection_params()
        .context("Incomplete fabric manager configuration")?;

    let client = FabricAgentClient::new(SshClient::new(params)).with_sync_lock(config.sync_lock());

    match cli.command {
        Commands::Sync { membership } => {
            let membership = PartitionMembership::load(&membership).await?;
            let status = client.full_sync(&membership).await?;
            println!("{status}");
            Ok(match status {
                PortStatus::Error => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Commands::PortStatus { vf_name, guid } => {
            let status = client.get_port_status(&vf_name, &guid).await?;
            println!("{status}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config {
            name,
            vf_name,
            args,
        } => {
            let status = client.cli().config_commands(&name, &vf_name, &args).await?;
            Ok(report_raw(status))
        }
        Commands::Query {
            name,
            vf_name,
            guids,
        } => {
            let status = client.cli().query_commands(&name, &vf_name, &guids).await?;
            Ok(report_raw(status))
        }
        Commands::Manage { name } => {
            let status = client.cli().management_commands(&name).await?;
            Ok(report_raw(status))
        }
    }
}

/// Print the remote status and mirror it as the process exit code.
fn report_raw(status: Option<ExitStatus>) -> ExitCode {
    match status {
        Some(status) => {
            println!("{status}");
            ExitCode::from(u8::try_from(status.code()).unwrap_or(u8::MAX))
        }
        None => ExitCode::from(UNKNOWN_COMMAND_EXIT),
    }
}
