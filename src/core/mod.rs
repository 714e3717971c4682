pub mod converter;
pub mod fetch;
pub mod prompt;
pub mod workflow;

pub use crate::domain::model::{
    Answer, ConversionOutput, DatabaseOutcome, SourceStatus, WorkflowPlan, WorkflowReport,
};
pub use crate::domain::ports::{ConfigProvider, Confirm, Converter, Storage};
pub use crate::utils::error::Result;
