use crate::domain::error::AskError;
use crate::domain::model::{Video, VideoSnapshot};
use crate::infrastructure::storage::db::TIMESTAMP_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct DatasetFile {
    pub videos: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub creator_id: String,
    pub video_created_at: String,
    #[serde(default)]
    pub views_count: i64,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub reports_count: i64,
    #[serde(default)]
    pub snapshots: Vec<SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotEntry {
    pub id: Option<String>,
    #[serde(default)]
    pub views_count: i64,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub reports_count: i64,
    #[serde(default)]
    pub delta_views_count: i64,
    #[serde(default)]
    pub delta_likes_count: i64,
    #[serde(default)]
    pub delta_comments_count: i64,
    #[serde(default)]
    pub delta_reports_count: i64,
    pub created_at: String,
}

/// Parse an RFC 3339 or naive `YYYY-MM-DD HH:MM:SS` timestamp into the
/// stored UTC text form.
pub fn parse_timestamp(raw: &str) -> Result<String, AskError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string());
    }

    // Naive forms are taken as UTC
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.format(TIMESTAMP_FORMAT).to_string());
        }
    }

    Err(AskError::DateParse(format!("Unrecognized timestamp: {}", raw)))
}

impl VideoEntry {
    pub fn into_rows(self) -> Result<(Video, Vec<VideoSnapshot>), AskError> {
        let video = Video {
            id: self.id,
            creator_id: self.creator_id,
            video_created_at: parse_timestamp(&self.video_created_at)?,
            views_count: self.views_count,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            reports_count: self.reports_count,
        };

        let snapshots = self
            .snapshots
            .into_iter()
            .map(|snap| {
                Ok(VideoSnapshot {
                    id: snap.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    video_id: video.id.clone(),
                    views_count: snap.views_count,
                    likes_count: snap.likes_count,
                    comments_count: snap.comments_count,
                    reports_count: snap.reports_count,
                    delta_views_count: snap.delta_views_count,
                    delta_likes_count: snap.delta_likes_count,
                    delta_comments_count: snap.delta_comments_count,
                    delta_reports_count: snap.delta_reports_count,
                    created_at: parse_timestamp(&snap.created_at)?,
                })
            })
            .collect::<Result<Vec<_>, AskError>>()?;

        Ok((video, snapshots))
    }
}
