use cityhub::config::toml_config::TomlConfig;
use cityhub::core::render::render;
use cityhub::utils::error::{ErrorSeverity, ListingError};
use cityhub::utils::{logger, validation::Validate};
use cityhub::{CliConfig, ListingFinder};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cityhub");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), ListingError> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Some(TomlConfig::from_file(path)?)
        }
        None => None,
    };

    let settings = cli.resolve(file)?;
    settings.validate()?;
    if settings.request.hints.near_me {
        tracing::info!("📍 Near-me hint recorded; listings carry no coordinates to rank by");
    }

    let finder = ListingFinder::new(settings.source.build_provider()?);
    // 單次執行不會有較新的查詢，結果一定會被採用
    if let Some(result) = finder.search(&settings.request, settings.at).await? {
        print!("{}", render(&result, settings.format)?);
    }

    Ok(())
}
