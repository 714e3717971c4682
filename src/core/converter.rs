use crate::config::{ConverterConfig, WorkflowConfig};
use crate::core::{ConversionOutput, Converter};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Runs an external program in the working directory and captures its output.
#[derive(Debug, Clone)]
pub struct SubprocessConverter {
    program: String,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl SubprocessConverter {
    pub fn new(converter: &ConverterConfig, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: converter.program.clone(),
            args: converter.args.clone(),
            work_dir: work_dir.into(),
        }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(&config.converter, config.work_dir.clone())
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Converter for SubprocessConverter {
    async fn convert(&self) -> Result<ConversionOutput> {
        tracing::debug!(
            "Running converter: {} (cwd: {})",
            self.command_line(),
            self.work_dir.display()
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SyncError::ConverterLaunchError {
                program: self.program.clone(),
                source,
            })?;

        Ok(ConversionOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shell(script: &str) -> ConverterConfig {
        ConverterConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[tokio::test]
    async fn test_runs_in_work_dir_and_captures_stdout() {
        let temp_dir = TempDir::new().unwrap();
        let converter = SubprocessConverter::new(
            &shell("echo built > repeaters.db && echo ok"),
            temp_dir.path(),
        );

        let output = converter.convert().await.unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.trim(), "ok");
        assert!(temp_dir.path().join("repeaters.db").exists());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        let converter =
            SubprocessConverter::new(&shell("echo 'no such table' >&2; exit 7"), temp_dir.path());

        let output = converter.convert().await.unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(7));
        assert!(output.stderr.contains("no such table"));
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConverterConfig {
            program: "repeater-sync-no-such-converter".to_string(),
            args: vec![],
        };
        let converter = SubprocessConverter::new(&config, temp_dir.path());

        let err = converter.convert().await.unwrap_err();
        assert!(matches!(err, SyncError::ConverterLaunchError { .. }));
    }

    #[test]
    fn test_command_line_joins_args() {
        let converter = SubprocessConverter::new(&ConverterConfig::default(), ".");
        assert_eq!(converter.command_line(), "python3 create_db.py");
    }
}
