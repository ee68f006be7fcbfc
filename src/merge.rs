use crate::config::MergeConfig;
use crate::error::ScoutError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a merge pass did
#[derive(Debug, Default)]
pub struct MergeReport {
    pub files_found: usize,
    pub records_merged: usize,
    /// File name and reason for every record left out
    pub skipped: Vec<(String, String)>,
    pub output_path: PathBuf,
}

/// Combine every record in the dataset directory into one JSON array.
///
/// Records are ordered by file name. Files that cannot be read or parsed are
/// skipped with a warning; only a missing dataset directory is fatal, and in
/// that case the output file is left untouched.
pub async fn merge_dataset(config: &MergeConfig) -> Result<MergeReport> {
    let dataset_dir = &config.dataset_dir;
    let exists = tokio::fs::try_exists(dataset_dir)
        .await
        .with_context(|| format!("Failed to check {}", dataset_dir.display()))?;
    if !exists {
        return Err(ScoutError::DatasetMissing(dataset_dir.clone()).into());
    }

    let files = json_files(dataset_dir).await?;
    info!("Found {} JSON files in dataset", files.len());

    let mut report = MergeReport {
        files_found: files.len(),
        output_path: config.output_path.clone(),
        ..MergeReport::default()
    };
    let mut jobs: Vec<Value> = Vec::with_capacity(files.len());

    for (name, path) in files {
        let parsed = tokio::fs::read_to_string(&path)
            .await
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(Into::into));

        match parsed {
            Ok(job) => {
                let title = job.get("title").and_then(Value::as_str).unwrap_or("");
                info!("✓ Loaded job from {}: {}", name, title);
                jobs.push(job);
            }
            Err(e) => {
                warn!("⚠ Could not parse {}: {}", name, e);
                report.skipped.push((name, e.to_string()));
            }
        }
    }

    let json = serde_json::to_string_pretty(&jobs)?;
    tokio::fs::write(&config.output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    report.records_merged = jobs.len();
    info!(
        "💾 Successfully combined {} jobs into {}",
        report.records_merged,
        config.output_path.display()
    );

    Ok(report)
}

/// `.json` files in `dir`, sorted by file name
async fn json_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") {
            files.push((name, entry.path()));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(files)
}
