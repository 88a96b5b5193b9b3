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

//! Transport error type.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while connecting to the fabric manager host or running a
/// command on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The host name did not resolve to any usable socket address.
    #[error("invalid address: {0}")]
    AddressInvalid(#[source] io::Error),

    /// The private key file could not be read or decoded.
    #[error("failed to load private key: {0}")]
    KeyInvalid(#[source] russh::keys::Error),

    /// The server refused the private key.
    #[error("key authentication failed")]
    KeyAuthFailed,

    /// The server host key did not match the configured known_hosts file.
    #[error("host key verification failed")]
    ServerCheckFailed,

    /// Protocol level failure inside russh.
    #[error("ssh error: {0}")]
    SshError(#[from] russh::Error),

    /// The channel closed without the remote side reporting an exit status.
    #[error("remote command closed the channel without an exit status")]
    CommandDidntExit,

    /// TCP connect plus handshake exceeded the configured limit.
    #[error("connection to {host} timed out after {}s", .timeout.as_secs())]
    ConnectTimeout { host: String, timeout: Duration },

    /// The remote command did not exit within the configured limit.
    #[error("command '{command}' did not exit within {}s", .timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_timeout_message() {
        let err = Error::ConnectTimeout {
            host: "fm01".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "connection to fm01 timed out after 5s");
    }

    #[test]
    fn test_timeout_messages_mention_seconds() {
        let err = Error::CommandTimeout {
            command: "opafmvf commit -f".to_string(),
            timeout: Duration::from_secs(42),
        };
        assert_eq!(
            err.to_string(),
            "command 'opafmvf commit -f' did not exit within 42s"
        );
    }
}
