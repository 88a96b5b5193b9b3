pub mod cli;
pub mod config;
pub mod executor;
pub mod fabric;
pub mod ssh;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use executor::CommandExecutor;
pub use fabric::{FabricAgentCli, FabricAgentClient, PortStatus};
pub use ssh::SshClient;
