pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://hearham.com/api/repeaters/v1";
pub const DEFAULT_SOURCE_FILE: &str = "repeaters.json";
pub const DEFAULT_DATABASE_FILE: &str = "repeaters.db";
pub const DEFAULT_BACKUP_FILE: &str = "repeaters.db.bak";
pub const DEFAULT_CONVERTER_PROGRAM: &str = "python3";
pub const DEFAULT_CONVERTER_ARGS: &[&str] = &["create_db.py"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_CONVERTER_PROGRAM.to_string(),
            args: DEFAULT_CONVERTER_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Resolved settings for one workflow run. File names are relative to `work_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub endpoint: String,
    pub work_dir: PathBuf,
    pub source_file: String,
    pub database_file: String,
    pub backup_file: String,
    pub converter: ConverterConfig,
    pub timeout_seconds: Option<u64>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            work_dir: PathBuf::from("."),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            backup_file: DEFAULT_BACKUP_FILE.to_string(),
            converter: ConverterConfig::default(),
            timeout_seconds: None,
        }
    }
}

impl WorkflowConfig {
    /// 以預設檔名在指定目錄下工作
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }
}

impl ConfigProvider for WorkflowConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn source_file(&self) -> &str {
        &self.source_file
    }

    fn database_file(&self) -> &str {
        &self.database_file
    }

    fn backup_file(&self) -> &str {
        &self.backup_file
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for WorkflowConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_path("work_dir", &self.work_dir.to_string_lossy())?;
        validation::validate_path("source_file", &self.source_file)?;
        validation::validate_path("database_file", &self.database_file)?;
        validation::validate_path("backup_file", &self.backup_file)?;
        validation::validate_distinct_paths("backup_file", &self.database_file, &self.backup_file)?;
        validation::validate_non_empty_string("converter.program", &self.converter.program)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use self::cli::CliConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_repeater_layout() {
        let config = WorkflowConfig::default();

        assert_eq!(config.source_file, "repeaters.json");
        assert_eq!(config.database_file, "repeaters.db");
        assert_eq!(config.backup_file, "repeaters.db.bak");
        assert_eq!(config.converter.program, "python3");
        assert_eq!(config.converter.args, vec!["create_db.py".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_backup_equal_to_database() {
        let mut config = WorkflowConfig::in_dir("/tmp");
        config.backup_file = config.database_file.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout_and_blank_converter() {
        let mut config = WorkflowConfig::default();
        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        let mut config = WorkflowConfig::default();
        config.converter.program = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
