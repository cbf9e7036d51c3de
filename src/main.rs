use athletics_records::config::cli::{Command, OutputFormat};
use athletics_records::core::report;
use athletics_records::domain::model::{
    Gender, MeetingResult, NewPerformance, RankingRow, VenueFilter, YearFilter,
};
use athletics_records::utils::error::{ErrorSeverity, Result};
use athletics_records::utils::{date_format, logger, validation::{self, Validate}};
use athletics_records::{CliConfig, EngineError, InMemoryStore, RecordEngine};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting athletics-records CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Invalid arguments: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
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

    Ok(())
}

async fn load_store(path: &str) -> Result<InMemoryStore> {
    if !tokio::fs::try_exists(path).await? {
        tracing::warn!(path, "dataset not found, starting with an empty database");
        return Ok(InMemoryStore::default());
    }
    let content = tokio::fs::read_to_string(path).await?;
    InMemoryStore::from_json(&content)
}

async fn run(config: &CliConfig) -> Result<()> {
    let store = load_store(&config.data).await?;
    let engine = RecordEngine::new(store.clone(), store.clone());

    match &config.command {
        Command::Rank {
            discipline,
            year,
            age_group,
            venue,
            format,
        } => {
            let year = YearFilter::from_label(year).unwrap_or(YearFilter::AllTime);
            let venue = VenueFilter::from_label(venue).unwrap_or(VenueFilter::All);
            let rows = engine.rank(discipline, year, age_group, venue)?;
            print_rows(&rows, *format)?;
        }
        Command::Classify {
            athlete,
            discipline,
            value,
            date,
        } => {
            let detail = engine.classify(*athlete, discipline, value, date_format::parse(date)?)?;
            if detail.tag.is_record() {
                println!("🏅 {}  ({})", detail.tag, detail.tooltip());
            } else {
                println!("-");
            }
        }
        Command::Add {
            athlete,
            discipline,
            value,
            date,
            city,
            wind,
            placement,
            indoor,
        } => {
            let code = validation::parse_discipline(discipline)?;
            let date = date_format::parse(date)?;
            let value = validation::parse_value(value)?;

            // classify first so an unknown athlete never reaches the store
            let detail = engine.classify(*athlete, code, &value, date)?;
            let outcome = store.ingest(NewPerformance {
                athlete_id: *athlete,
                discipline: code.to_string(),
                date,
                city: city.trim().to_string(),
                raw_value: value,
                wind: validation::parse_wind(wind)?,
                placement: validation::parse_placement(placement)?,
                indoor: *indoor,
                championship: None,
            })?;
            store.save(&config.data)?;

            let stored = outcome.performance();
            println!("✅ {} {}  {}", stored.display_value(), stored.venue_and_date(), detail.tag);
        }
        Command::Ingest {
            results,
            city,
            championship,
        } => {
            let content = tokio::fs::read_to_string(results).await?;
            let results: Vec<MeetingResult> = serde_json::from_str(&content)?;
            let annotations = engine.annotate(city, championship.as_deref(), &results)?;
            store.save(&config.data)?;

            for a in &annotations {
                let medal = a.medal.map(|m| format!(" {:?}", m)).unwrap_or_default();
                println!("{:<28} {:<12} {:<4}{}  {}", a.name, a.value, a.tag, medal, a.tooltip);
            }
            println!("✅ {} results processed", annotations.len());
        }
        Command::Athlete { id, as_of } => {
            let as_of = match as_of {
                Some(date) => date_format::parse(date)?,
                None => chrono::Local::now().date_naive(),
            };
            let overview = engine.athlete_overview(*id, as_of)?;
            println!(
                "{} ({}, {})",
                overview.athlete.name,
                overview.athlete.year_of_birth,
                overview.athlete.gender.code()
            );
            println!();
            println!("Personal bests as of {}:", date_format::format(as_of));
            for pb in &overview.personal_bests {
                println!("  {:<20} {:<16} {}, den {}", pb.discipline, pb.value, pb.city, pb.date);
            }
            println!();
            for line in &overview.performances {
                println!("  {}  {:<20} {:<16} {}", line.date, line.discipline, line.value, line.city);
            }
        }
        Command::AddAthlete {
            name,
            year_of_birth,
            gender,
        } => {
            let gender = Gender::from_code(*gender).ok_or_else(|| EngineError::InvalidConfigValueError {
                field: "gender".to_string(),
                value: gender.to_string(),
                reason: "Expected M or W".to_string(),
            })?;
            let athlete = store.add_athlete(name.trim(), *year_of_birth, gender)?;
            store.save(&config.data)?;
            println!("✅ {} added with id {}", athlete.name, athlete.id);
        }
    }

    Ok(())
}

fn print_rows(rows: &[RankingRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => report::write_csv(rows, std::io::stdout().lock()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
            Ok(())
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No performances found.");
            }
            for row in rows {
                println!(
                    "{:>3}. {:<28} {:<6} {:<16} {}",
                    row.rank, row.name, row.class, row.result, row.venue
                );
            }
            Ok(())
        }
    }
}
