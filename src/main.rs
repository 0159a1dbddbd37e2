use clap::Parser;
use resume_export::config::cli::{Command, ExportArgs, ValidateArgs};
use resume_export::utils::{logger, validation::Validate};
use resume_export::{load_resume, Cli, ExportEngine, ExportError};

fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    let result = match &cli.command {
        Command::Export(args) => run_export(&cli, args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run_export(cli: &Cli, args: &ExportArgs) -> Result<(), ExportError> {
    let file_config = cli.file_config()?;
    let config = args.resolve(&file_config);
    tracing::debug!("Export config: {:?}", config);

    let report = ExportEngine::new(config).run()?;

    println!("✅ Exported resume to {}", report.index_path.display());
    println!(
        "📁 Copied {} assets and {} directories from the theme",
        report.assets_copied, report.directories_created
    );
    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<(), ExportError> {
    let resume = load_resume(&args.source)?;
    resume.validate()?;

    println!("✅ {} is a valid resume", args.source.display());
    println!(
        "📄 {} work, {} education, {} skills entries",
        resume.work.len(),
        resume.education.len(),
        resume.skills.len()
    );
    Ok(())
}
