use std::path::PathBuf;

/// Result of the "ensure source data" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    AlreadyPresent,
    Downloaded { bytes: usize },
}

/// Terminal state of the "ensure database" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseOutcome {
    /// 資料庫原本不存在，已建立
    Built,
    /// 舊資料庫已搬到備份路徑後重建
    Rebuilt { backup: PathBuf },
    /// 使用者拒絕覆蓋
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub source: SourceStatus,
    pub database: DatabaseOutcome,
}

/// What a run would do, computed without touching the network or the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub fetch_needed: bool,
    pub database_present: bool,
}

/// Captured outcome of one converter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ConversionOutput {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        matches!(self, Answer::Yes)
    }
}
