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

//! Configuration loading and priority management.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Config;
use super::utils::{env_override, expand_tilde};

pub const ENV_IP_ADDRESS: &str = "FABRIC_AGENT_IP_ADDRESS";
pub const ENV_USERNAME: &str = "FABRIC_AGENT_USERNAME";
pub const ENV_SSH_KEY: &str = "FABRIC_AGENT_SSH_KEY";

const CURRENT_DIR_CONFIG: &str = "fabric-agent.yaml";

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read configuration file at {}. Please check file permissions.",
                    expanded_path.display()
                )
            })?;

        // An empty file is an empty configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse YAML configuration file at {}. Please check the YAML syntax is valid.",
                expanded_path.display()
            )
        })
    }

    /// Load configuration with priority order:
    /// 1. Explicit --config path (must exist)
    /// 2. Current directory fabric-agent.yaml
    /// 3. XDG config directory ($XDG_CONFIG_HOME/fabric-agent/config.yaml)
    ///
    /// Environment variables are applied on top of whichever source won.
    pub async fn load_with_priority(cli_config_path: Option<&Path>) -> Result<Self> {
        let mut config = match cli_config_path {
            Some(path) => {
                tracing::debug!("Using explicitly specified config file: {:?}", path);
                Self::load(path).await?
            }
            None => Self::load_from_standard_locations().await?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    async fn load_from_standard_locations() -> Result<Self> {
        let current_dir_config = PathBuf::from(CURRENT_DIR_CONFIG);
        if current_dir_config.exists() {
            tracing::debug!("Found {} in current directory", CURRENT_DIR_CONFIG);
            return Self::load(&current_dir_config).await;
        }

        if let Some(xdg_config) = Self::xdg_config_path() {
            tracing::debug!("Checking XDG config path: {:?}", xdg_config);
            if xdg_config.exists() {
                return Self::load(&xdg_config).await;
            }
        }

        tracing::debug!("No config file found, relying on environment variables");
        Ok(Self::default())
    }

    fn xdg_config_path() -> Option<PathBuf> {
        if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
            return Some(
                PathBuf::from(xdg_config_home)
                    .join("fabric-agent")
                    .join("config.yaml"),
            );
        }
        ProjectDirs::from("", "", "fabric-agent").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Override fabric credentials from `FABRIC_AGENT_*` variables.
    pub fn apply_env_overrides(&mut self) {
        if let Some(ip_address) = env_override(ENV_IP_ADDRESS) {
            self.fabric.ip_address = Some(ip_address);
        }
        if let Some(username) = env_override(ENV_USERNAME) {
            self.fabric.username = Some(username);
        }
        if let Some(ssh_key) = env_override(ENV_SSH_KEY) {
            self.fabric.ssh_key = Some(ssh_key);
        }
    }
}
