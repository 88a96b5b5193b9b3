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

//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Read a non-empty environment variable.
pub(super) fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_expand_tilde() {
        let original_home = std::env::var("HOME").ok();
        unsafe {
            std::env::set_var("HOME", "/home/fabric");
        }

        assert_eq!(
            expand_tilde(Path::new("~/.ssh/id_rsa")),
            PathBuf::from("/home/fabric/.ssh/id_rsa")
        );
        assert_eq!(
            expand_tilde(Path::new("/etc/ssh/key")),
            PathBuf::from("/etc/ssh/key")
        );
        assert_eq!(
            expand_tilde(Path::new("keys/~/id")),
            PathBuf::from("keys/~/id")
        );

        unsafe {
            match original_home {
                Some(home) => std::env::set_var("HOME", home),
                None => std::env::remove_var("HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_env_override_ignores_blank() {
        unsafe {
            std::env::set_var("FABRIC_AGENT_TEST_BLANK", "  ");
            std::env::set_var("FABRIC_AGENT_TEST_VALUE", "fm01");
        }
        assert_eq!(env_override("FABRIC_AGENT_TEST_BLANK"), None);
        assert_eq!(env_override("FABRIC_AGENT_TEST_VALUE").as_deref(), Some("fm01"));
        assert_eq!(env_override("FABRIC_AGENT_TEST_UNSET"), None);
        unsafe {
            std::env::remove_var("FABRIC_AGENT_TEST_BLANK");
            std::env::remove_var("FABRIC_AGENT_TEST_VALUE");
        }
    }
}
