pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, WorkflowConfig};
pub use core::{
    converter::SubprocessConverter,
    fetch::HttpFetcher,
    prompt::{FixedAnswer, TerminalPrompt},
    workflow::SyncWorkflow,
};
pub use utils::error::{Result, SyncError};
