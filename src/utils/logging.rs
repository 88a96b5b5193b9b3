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

use tracing_subscriber::EnvFilter;

/// Create an environment filter based on verbosity level
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        // RUST_LOG wins so russh internals can be traced on their own
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity_directives(verbosity))
    }
}

fn verbosity_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fabric_agent=warn",
        1 => "fabric_agent=info",
        // -vv: include russh handshake and channel logs
        2 => "fabric_agent=debug,russh=debug",
        _ => "fabric_agent=trace,russh=trace",
    }
}

/// Install the console subscriber. Logs go to stderr so stdout only
/// carries command results.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_env_filter() {
        for verbosity in 0..=4 {
            let _ = create_env_filter(verbosity);
        }
    }

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(verbosity_directives(0), "fabric_agent=warn");
        assert_eq!(verbosity_directives(1), "fabric_agent=info");
        assert!(verbosity_directives(2).contains("russh=debug"));
        assert_eq!(verbosity_directives(7), verbosity_directives(3));
    }
}
