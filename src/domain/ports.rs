use crate::domain::model::{Answer, ConversionOutput};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File operations relative to the working directory.
pub trait Storage: Send + Sync {
    fn resolve(&self, path: &str) -> PathBuf;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Moves `from` to `to`, replacing `to` if it already exists.
    fn rename(&self, from: &str, to: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn work_dir(&self) -> &Path;
    fn source_file(&self) -> &str;
    fn database_file(&self) -> &str;
    fn backup_file(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Builds the database from the source file. Failure to launch is an `Err`;
/// a launched program that exits unsuccessfully is reported in the output.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self) -> Result<ConversionOutput>;
}

/// Source of the single overwrite decision.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<Answer>;
}
