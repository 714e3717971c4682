use crate::core::fetch::HttpFetcher;
use crate::core::{
    ConfigProvider, Confirm, Converter, DatabaseOutcome, SourceStatus, Storage, WorkflowPlan,
    WorkflowReport,
};
use crate::utils::error::{Result, SyncError};

/// Fetch-or-skip the source file, then build or confirm-overwrite the database.
pub struct SyncWorkflow<S: Storage, C: Converter, P: Confirm> {
    storage: S,
    converter: C,
    prompt: P,
    fetcher: HttpFetcher,
    source_file: String,
    database_file: String,
    backup_file: String,
}

impl<S: Storage, C: Converter, P: Confirm> SyncWorkflow<S, C, P> {
    pub fn new<Cfg: ConfigProvider>(config: &Cfg, storage: S, converter: C, prompt: P) -> Result<Self> {
        Ok(Self {
            storage,
            converter,
            prompt,
            fetcher: HttpFetcher::from_config(config)?,
            source_file: config.source_file().to_string(),
            database_file: config.database_file().to_string(),
            backup_file: config.backup_file().to_string(),
        })
    }

    /// 檢查現況，不做任何變更
    pub async fn plan(&self) -> Result<WorkflowPlan> {
        Ok(WorkflowPlan {
            fetch_needed: !self.storage.exists(&self.source_file).await?,
            database_present: self.storage.exists(&self.database_file).await?,
        })
    }

    pub async fn run(&mut self) -> Result<WorkflowReport> {
        let source = self.ensure_source_data().await?;
        let database = self.ensure_database().await?;
        Ok(WorkflowReport { source, database })
    }

    pub async fn ensure_source_data(&self) -> Result<SourceStatus> {
        if self.storage.exists(&self.source_file).await? {
            tracing::debug!("{} already present, skipping download", self.source_file);
            return Ok(SourceStatus::AlreadyPresent);
        }

        println!("Downloading {} from {}...", self.source_file, self.fetcher.endpoint());
        let body = self.fetcher.fetch().await?;

        self.storage.write_file(&self.source_file, &body).await?;
        tracing::info!("📥 Saved {} bytes to {}", body.len(), self.source_file);

        Ok(SourceStatus::Downloaded { bytes: body.len() })
    }

    pub async fn ensure_database(&mut self) -> Result<DatabaseOutcome> {
        if !self.storage.exists(&self.database_file).await? {
            self.build_database().await?;
            return Ok(DatabaseOutcome::Built);
        }

        let question = format!("{} already exists. Overwrite?", self.database_file);
        if !self.prompt.confirm(&question)?.is_yes() {
            tracing::debug!("Overwrite declined, keeping {}", self.database_file);
            return Ok(DatabaseOutcome::Unchanged);
        }

        // 只保留一代備份，舊的備份直接被取代
        self.storage
            .rename(&self.database_file, &self.backup_file)
            .await?;
        println!("Moved existing {} to {}", self.database_file, self.backup_file);

        self.build_database().await?;

        Ok(DatabaseOutcome::Rebuilt {
            backup: self.storage.resolve(&self.backup_file),
        })
    }

    async fn build_database(&self) -> Result<()> {
        println!("Creating {}...", self.database_file);

        let output = self.converter.convert().await?;
        for line in output.stdout.lines() {
            tracing::debug!("converter: {}", line);
        }

        if !output.success {
            return Err(SyncError::ConversionFailed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        if !self.storage.exists(&self.database_file).await? {
            return Err(SyncError::ConversionProducedNoOutput {
                path: self.storage.resolve(&self.database_file).display().to_string(),
            });
        }

        println!("Done. {} is ready.", self.database_file);
        Ok(())
    }
}
