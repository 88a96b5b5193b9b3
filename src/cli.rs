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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fabric-agent",
    version,
    about = "Manage OmniPath virtual fabric membership over SSH",
    long_about = "fabric-agent drives the opafmvf CLI on an OmniPath fabric manager host.\nEvery command opens its own SSH session, runs one opafmvf invocation and reports the remote exit status.",
    after_help = "EXAMPLES:\n  Sync membership:        fabric-agent sync membership.yaml\n  Check a port:           fabric-agent port-status compute 0x0011750101671ed9\n  Raw config command:     fabric-agent config create compute 0x8001\n  Raw query command:      fabric-agent query ismember compute 0x0011750101671ed9\n  Raw management command: fabric-agent manage commit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        help = "Configuration file path\nConfig loading priority:\n  1. This flag's value\n  2. Current directory (./fabric-agent.yaml)\n  3. User config ($XDG_CONFIG_HOME/fabric-agent/config.yaml)\nFABRIC_AGENT_IP_ADDRESS, FABRIC_AGENT_USERNAME and FABRIC_AGENT_SSH_KEY override file values"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(
        about = "Push partition membership to the fabric",
        long_about = "Adds each partition's GUIDs in file order, then commits and reloads the fabric.\nThe membership file is a YAML mapping of virtual fabric name to a list of port GUIDs.\n\nPrints DOWN on success (ports come up after the reload) or ERROR."
    )]
    Sync {
        #[arg(help = "YAML file mapping virtual fabric names to port GUIDs")]
        membership: PathBuf,
    },

    #[command(about = "Report whether a port GUID is a member of a virtual fabric (UP or DOWN)")]
    PortStatus {
        vf_name: String,
        guid: String,
    },

    #[command(
        about = "Run a configuration command (create, delete, add, remove)",
        after_help = "Exit code is the remote opafmvf exit status"
    )]
    Config {
        name: String,
        vf_name: String,
        #[arg(help = "Port GUIDs, or the pkey value for create")]
        args: Vec<String>,
    },

    #[command(
        about = "Run a query command (exist, ismember, isnotmember)",
        after_help = "Exit code is the remote opafmvf exit status"
    )]
    Query {
        name: String,
        vf_name: String,
        guids: Vec<String>,
    },

    #[command(
        about = "Run a management command (reset, commit, reload, restart, abort)",
        after_help = "Exit code is the remote opafmvf exit status"
    )]
    Manage { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from(["fabric-agent", "-vv", "sync", "members.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
        assert_eq!(
            cli.command,
            Commands::Sync {
                membership: PathBuf::from("members.yaml")
            }
        );
    }

    #[test]
    fn test_parse_raw_config_with_args() {
        let cli = Cli::try_parse_from([
            "fabric-agent",
            "--config",
            "/etc/fabric-agent.yaml",
            "config",
            "add",
            "compute",
            "g1",
            "g2",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/fabric-agent.yaml")));
        assert_eq!(
            cli.command,
            Commands::Config {
                name: "add".to_string(),
                vf_name: "compute".to_string(),
                args: vec!["g1".to_string(), "g2".to_string()],
            }
        );
    }

    #[test]
    fn test_port_status_requires_guid() {
        assert!(Cli::try_parse_from(["fabric-agent", "port-status", "compute"]).is_err());
    }

    #[test]
    fn test_manage_takes_unvalidated_name() {
        let cli = Cli::try_parse_from(["fabric-agent", "manage", "explode"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Manage {
                name: "explode".to_string()
            }
        );
    }
}
