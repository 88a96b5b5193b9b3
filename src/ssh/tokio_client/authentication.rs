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

//! Private key authentication and server verification.
//!
//! The fabric manager host is reached with a single RSA private key file.
//! The key is loaded before any socket is opened so an unreadable key fails
//! fast, without touching the network.

use russh::client::{Handle, Handler};
use russh::keys::PrivateKey;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zeroize::Zeroizing;

/// An authentication token.
///
/// Used when creating a [`Client`](super::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthMethod {
    PrivateKeyFile {
        key_file_path: PathBuf,
        key_pass: Option<Zeroizing<String>>,
    },
}

impl AuthMethod {
    pub fn with_key_file<T: AsRef<Path>>(key_file_path: T, passphrase: Option<&str>) -> Self {
        Self::PrivateKeyFile {
            key_file_path: key_file_path.as_ref().to_path_buf(),
            key_pass: passphrase.map(|p| Zeroizing::new(p.to_string())),
        }
    }

    /// Read and decode the key material.
    pub fn load_key(&self) -> Result<PrivateKey, super::Error> {
        match self {
            AuthMethod::PrivateKeyFile {
                key_file_path,
                key_pass,
            } => russh::keys::load_secret_key(key_file_path, key_pass.as_ref().map(|p| p.as_str()))
                .map_err(super::Error::KeyInvalid),
        }
    }
}

/// Server host key verification methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ServerCheckMethod {
    /// Accept whatever host key the server presents.
    #[default]
    NoCheck,
    /// Require the host key to be listed in the given known_hosts file.
    KnownHostsFile(PathBuf),
}

impl ServerCheckMethod {
    pub fn with_known_hosts_file<T: AsRef<Path>>(known_hosts_file: T) -> Self {
        Self::KnownHostsFile(known_hosts_file.as_ref().to_path_buf())
    }
}

/// Performs public key authentication on an established handle.
pub(super) async fn authenticate<H: Handler>(
    handle: &mut Handle<H>,
    username: &str,
    key: PrivateKey,
) -> Result<(), super::Error> {
    let is_authenticated = handle
        .authenticate_publickey(
            username,
            russh::keys::PrivateKeyWithHashAlg::new(
                Arc::new(key),
                handle.best_supported_rsa_hash().await?.flatten(),
            ),
        )
        .await?;
    if !is_authenticated.success() {
        return Err(super::Error::KeyAuthFailed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_key_file_keeps_path_and_passphrase() {
        let auth = AuthMethod::with_key_file("/etc/fabric/id_rsa", Some("secret"));
        match auth {
            AuthMethod::PrivateKeyFile {
                key_file_path,
                key_pass,
            } => {
                assert_eq!(key_file_path, PathBuf::from("/etc/fabric/id_rsa"));
                assert_eq!(key_pass.as_deref().map(String::as_str), Some("secret"));
            }
        }
    }

    #[test]
    fn test_load_key_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let auth = AuthMethod::with_key_file(temp_dir.path().join("absent"), None);
        let err = auth.load_key().unwrap_err();
        assert!(matches!(err, super::super::Error::KeyInvalid(_)));
    }

    #[test]
    fn test_load_key_garbage_content() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("id_rsa");
        std::fs::write(&key_path, "not a key").unwrap();

        let auth = AuthMethod::with_key_file(&key_path, None);
        assert!(matches!(
            auth.load_key(),
            Err(super::super::Error::KeyInvalid(_))
        ));
    }

    #[test]
    fn test_default_server_check_accepts_any_key() {
        assert_eq!(ServerCheckMethod::default(), ServerCheckMethod::NoCheck);
    }
}
