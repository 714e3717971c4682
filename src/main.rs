use clap::Parser;
use repeater_sync::core::{
    Answer, Confirm, DatabaseOutcome, SourceStatus, WorkflowPlan, WorkflowReport,
};
use repeater_sync::utils::{logger, validation::Validate};
use repeater_sync::{
    CliConfig, FixedAnswer, LocalStorage, SubprocessConverter, SyncError, SyncWorkflow,
    TerminalPrompt, WorkflowConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting repeater-sync");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    let result = if cli.dry_run {
        dry_run(&config, cli.yes).await
    } else if cli.yes {
        execute(&config, FixedAnswer(Answer::Yes)).await
    } else {
        execute(&config, TerminalPrompt::stdio()).await
    };

    match result {
        Ok(Some(report)) => log_report(&report),
        Ok(None) => {}
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn execute<P: Confirm>(
    config: &WorkflowConfig,
    prompt: P,
) -> repeater_sync::Result<Option<WorkflowReport>> {
    let storage = LocalStorage::from_config(config);
    let converter = SubprocessConverter::from_config(config);
    let mut workflow = SyncWorkflow::new(config, storage, converter, prompt)?;

    workflow.run().await.map(Some)
}

async fn dry_run(
    config: &WorkflowConfig,
    assume_yes: bool,
) -> repeater_sync::Result<Option<WorkflowReport>> {
    tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");

    let storage = LocalStorage::from_config(config);
    let converter = SubprocessConverter::from_config(config);
    let command_line = converter.command_line();
    let workflow = SyncWorkflow::new(config, storage, converter, FixedAnswer(Answer::No))?;
    let plan = workflow.plan().await?;

    for line in describe_plan(&plan, config, &command_line, assume_yes) {
        println!("{}", line);
    }

    Ok(None)
}

fn describe_plan(
    plan: &WorkflowPlan,
    config: &WorkflowConfig,
    command_line: &str,
    assume_yes: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    if plan.fetch_needed {
        lines.push(format!("Would download {} from {}", config.source_file, config.endpoint));
    } else {
        lines.push(format!("{} already present, no download", config.source_file));
    }

    if !plan.database_present {
        lines.push(format!("Would create {} by running '{}'", config.database_file, command_line));
    } else if assume_yes {
        lines.push(format!(
            "{} exists: would move it to {} and run '{}' without asking",
            config.database_file, config.backup_file, command_line
        ));
    } else {
        lines.push(format!(
            "{} exists: would ask before moving it to {} and running '{}'",
            config.database_file, config.backup_file, command_line
        ));
    }

    lines
}

fn log_report(report: &WorkflowReport) {
    match &report.source {
        SourceStatus::AlreadyPresent => tracing::info!("Source data already present"),
        SourceStatus::Downloaded { bytes } => tracing::info!("Source data downloaded ({} bytes)", bytes),
    }

    match &report.database {
        DatabaseOutcome::Built => tracing::info!("✅ Database built"),
        DatabaseOutcome::Rebuilt { backup } => {
            tracing::info!("✅ Database rebuilt, previous copy at {}", backup.display())
        }
        DatabaseOutcome::Unchanged => tracing::info!("Database left unchanged"),
    }
}

fn exit_with(e: SyncError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ repeater-sync failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
