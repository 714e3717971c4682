use crate::config::WorkflowConfig;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceSection>,
    pub database: Option<DatabaseSection>,
    pub converter: Option<ConverterSection>,
    pub workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub endpoint: Option<String>,
    pub filename: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub filename: Option<String>,
    pub backup_filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterSection {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSection {
    pub dir: Option<PathBuf>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyncError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPEATER_API})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的欄位套用到預設值上
    pub fn into_workflow_config(self) -> WorkflowConfig {
        let mut config = WorkflowConfig::default();

        if let Some(source) = self.source {
            if let Some(endpoint) = source.endpoint {
                config.endpoint = endpoint;
            }
            if let Some(filename) = source.filename {
                config.source_file = filename;
            }
            config.timeout_seconds = source.timeout_seconds.or(config.timeout_seconds);
        }

        if let Some(database) = self.database {
            if let Some(filename) = database.filename {
                config.database_file = filename;
            }
            if let Some(backup) = database.backup_filename {
                config.backup_file = backup;
            }
        }

        if let Some(converter) = self.converter {
            if let Some(program) = converter.program {
                config.converter.program = program;
                config.converter.args.clear();
            }
            if let Some(args) = converter.args {
                config.converter.args = args;
            }
        }

        if let Some(dir) = self.workspace.and_then(|w| w.dir) {
            config.work_dir = dir;
        }

        config
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_workflow_config().validate()
    }
}
