use crate::adapters::memory::InMemoryStore;
use crate::config::toml_config::ReportConfig;
use crate::core::engine::RecordEngine;
use crate::core::ranking::{RankingRequest, ALL_AGE_GROUPS};
use crate::domain::model::RankingRow;
use crate::utils::error::{EngineError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Writes ranking rows as CSV with header `rank,name,class,result,venue`.
pub fn write_csv<W: Write>(rows: &[RankingRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(["rank", "name", "class", "result", "venue"])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Output file name without extension. Only ASCII letters and digits of each
/// part are kept, so config labels cannot leave the output directory.
pub fn file_stem(request: &RankingRequest) -> String {
    let age_group = match file_safe(&request.age_group.label) {
        label if label.is_empty() => ALL_AGE_GROUPS.to_string(),
        label => label,
    };
    format!(
        "{}_{}_{}_{}",
        file_safe(&request.discipline_code),
        file_safe(&request.year.label()),
        age_group,
        request.venue.label()
    )
}

fn file_safe(part: &str) -> String {
    part.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// One finished ranking as written to disk.
#[derive(Debug, Clone)]
pub struct RankingExport {
    pub request: RankingRequest,
    pub rows: Vec<RankingRow>,
}

/// Computes every configured ranking against one shared engine.
///
/// Rankings run on the blocking pool; results come back in config order.
pub async fn compute_rankings(
    engine: Arc<RecordEngine<InMemoryStore, InMemoryStore>>,
    requests: Vec<RankingRequest>,
) -> Result<Vec<RankingExport>> {
    let mut tasks = JoinSet::new();

    for (index, request) in requests.into_iter().enumerate() {
        let engine = Arc::clone(&engine);
        tasks.spawn_blocking(move || {
            let rows = engine.rank_request(&request)?;
            Ok::<_, EngineError>((index, RankingExport { request, rows }))
        });
    }

    let mut finished = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, export) = joined.map_err(|e| EngineError::TaskFailed {
            message: e.to_string(),
        })??;
        tracing::debug!(
            ranking = %file_stem(&export.request),
            rows = export.rows.len(),
            "ranking computed"
        );
        finished.push((index, export));
    }

    finished.sort_by_key(|(index, _)| *index);
    Ok(finished.into_iter().map(|(_, export)| export).collect())
}

async fn write_export(export: &RankingExport, dir: &Path, formats: &[String]) -> Result<Vec<PathBuf>> {
    let stem = file_stem(&export.request);
    let mut written = Vec::new();

    for format in formats {
        let path = dir.join(format!("{}.{}", stem, format));
        let bytes = match format.as_str() {
            "csv" => {
                let mut buffer = Vec::new();
                write_csv(&export.rows, &mut buffer)?;
                buffer
            }
            "json" => serde_json::to_vec_pretty(&export.rows)?,
            other => {
                return Err(EngineError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: other.to_string(),
                    reason: "Supported formats are csv and json".to_string(),
                })
            }
        };
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }

    Ok(written)
}

/// Runs the whole report: load the dataset, compute, write one file per
/// ranking and format. Returns the written paths.
pub async fn run_report(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let requests = config.requests()?;

    tracing::info!(path = %config.data.path, "loading dataset");
    let content = tokio::fs::read_to_string(&config.data.path).await?;
    let store = InMemoryStore::from_json(&content)?;
    let engine = Arc::new(RecordEngine::new(store.clone(), store));

    let exports = compute_rankings(engine, requests).await?;

    let output_dir = Path::new(&config.output.path);
    tokio::fs::create_dir_all(output_dir).await?;

    let mut written = Vec::new();
    for export in &exports {
        written.extend(write_export(export, output_dir, &config.output.formats).await?);
    }

    tracing::info!(
        report = %config.report.name,
        rankings = exports.len(),
        files = written.len(),
        "report written"
    );
    Ok(written)
}
