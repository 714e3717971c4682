use crate::core::{ConfigProvider, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.work_dir())
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let exists = tokio::fs::try_exists(self.resolve(path)).await?;
        Ok(exists)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let target = self.resolve(to);

        // 備份路徑可以放在子目錄
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::rename(self.resolve(from), target).await?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
mod args {
    use crate::config::{toml_config::TomlConfig, WorkflowConfig};
    use crate::utils::error::Result;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "repeater-sync")]
    #[command(about = "Download the repeater dataset and build the local repeater database")]
    pub struct CliConfig {
        /// Path to an optional TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Repeater API endpoint
        #[arg(long)]
        pub endpoint: Option<String>,

        /// Directory holding the source, database and backup files
        #[arg(long)]
        pub work_dir: Option<PathBuf>,

        #[arg(long)]
        pub source_file: Option<String>,

        #[arg(long)]
        pub database_file: Option<String>,

        #[arg(long)]
        pub backup_file: Option<String>,

        /// Converter program that turns the source file into the database
        #[arg(long)]
        pub converter: Option<String>,

        /// Argument passed to the converter (repeatable)
        #[arg(long = "converter-arg", allow_hyphen_values = true)]
        pub converter_args: Vec<String>,

        /// Download timeout in seconds
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        /// Overwrite an existing database without asking
        #[arg(short, long)]
        pub yes: bool,

        /// Show what would be done without downloading or converting
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// 合併順序: 預設值 < TOML 檔案 < 命令列參數
        pub fn resolve(&self) -> Result<WorkflowConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?.into_workflow_config(),
                None => WorkflowConfig::default(),
            };

            if let Some(endpoint) = &self.endpoint {
                config.endpoint = endpoint.clone();
            }
            if let Some(work_dir) = &self.work_dir {
                config.work_dir = work_dir.clone();
            }
            if let Some(source_file) = &self.source_file {
                config.source_file = source_file.clone();
            }
            if let Some(database_file) = &self.database_file {
                config.database_file = database_file.clone();
            }
            if let Some(backup_file) = &self.backup_file {
                config.backup_file = backup_file.clone();
            }

            // 指定新的轉換程式時，參數也一併取代
            if let Some(program) = &self.converter {
                config.converter.program = program.clone();
                config.converter.args = self.converter_args.clone();
            } else if !self.converter_args.is_empty() {
                config.converter.args = self.converter_args.clone();
            }

            if self.timeout_seconds.is_some() {
                config.timeout_seconds = self.timeout_seconds;
            }

            Ok(config)
        }
    }

}

#[cfg(feature = "cli")]
pub use args::CliConfig;
