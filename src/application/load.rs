use crate::domain::error::AskError;
use crate::domain::model::LoadReport;
use crate::infrastructure::storage::db::{batch_insert_videos, TIMESTAMP_FORMAT};
use crate::ingest::dataset::DatasetFile;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio_rusqlite::Connection;
use tracing::info;

/// Read a JSON dataset file into memory.
pub async fn read_dataset(path: &Path) -> Result<DatasetFile, AskError> {
    if !path.exists() {
        return Err(AskError::Load(format!("File not found: {}", path.display())));
    }

    let content = tokio::fs::read(path).await?;
    let dataset: DatasetFile = serde_json::from_slice(&content)?;
    Ok(dataset)
}

/// Load a dataset file into the store in one transaction.
pub async fn load_dataset(
    db: &Connection,
    path: &Path,
    show_progress: bool,
) -> Result<LoadReport, AskError> {
    let dataset = read_dataset(path).await?;
    let total = dataset.videos.len();

    // Parse every timestamp before writing anything
    let items = dataset
        .videos
        .into_iter()
        .map(|entry| {
            let id = entry.id.clone();
            entry
                .into_rows()
                .map_err(|e| AskError::Load(format!("Video {}: {}", id, e)))
        })
        .collect::<Result<Vec<_>, AskError>>()?;

    let progress = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} videos")
                .map_err(|e| AskError::Load(e.to_string()))?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let loaded_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let report = batch_insert_videos(db, items, loaded_at, progress.clone()).await?;

    if let Some(pb) = progress {
        pb.finish_with_message("Loaded");
    }

    info!(
        "Loaded {} videos and {} snapshots from {}",
        report.videos,
        report.snapshots,
        path.display()
    );
    Ok(report)
}
