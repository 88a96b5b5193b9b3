pub mod client;
pub mod tokio_client;

pub use client::{ConnectionParams, SshClient};
