use anyhow::Context;
use athletics_records::config::toml_config::ReportConfig;
use athletics_records::core::report::{self, file_stem};
use athletics_records::utils::error::ErrorSeverity;
use athletics_records::utils::{logger, validation::Validate};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ranking-report")]
#[command(about = "Export configured rankings from the club database")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ranking-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines, overriding the config
    #[arg(long)]
    json_logs: bool,

    /// Show which files would be written without computing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ReportConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if args.json_logs || config.json_logs() {
        let level = if args.verbose { "debug" } else { config.log_level() };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting ranking report");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No rankings will be computed");
        perform_dry_run(&config)?;
        return Ok(());
    }

    match report::run_report(&config).await {
        Ok(written) => {
            tracing::info!("✅ Report completed, {} files written", written.len());
            println!("✅ Report completed successfully!");
            for path in &written {
                println!("📁 {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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
    }

    Ok(())
}

fn display_config_summary(config: &ReportConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Dataset: {}", config.data.path);
    println!("  Output: {}", config.output.path);
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Rankings: {}", config.rankings.len());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &ReportConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let requests = config.requests().context("invalid ranking definition")?;
    for request in &requests {
        let stem = file_stem(request);
        for format in &config.output.formats {
            println!("  {}/{}.{}", config.output.path, stem, format);
        }
    }

    println!();
    println!("✅ Dry run complete, {} files would be written.", requests.len() * config.output.formats.len());

    Ok(())
}
