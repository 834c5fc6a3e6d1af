use crate::domain::error::AskError;
use crate::domain::model::{LoadReport, Video, VideoSnapshot};
use indicatif::ProgressBar;
use rusqlite::types::Value;
use rusqlite::OpenFlags;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Timestamp layout shared with SQLite's `datetime()` output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS videos (
    id TEXT PRIMARY KEY,
    creator_id TEXT NOT NULL,
    video_created_at TEXT NOT NULL,
    views_count INTEGER NOT NULL DEFAULT 0,
    likes_count INTEGER NOT NULL DEFAULT 0,
    comments_count INTEGER NOT NULL DEFAULT 0,
    reports_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS video_snapshots (
    id TEXT PRIMARY KEY,
    video_id TEXT NOT NULL REFERENCES videos(id),
    views_count INTEGER NOT NULL DEFAULT 0,
    likes_count INTEGER NOT NULL DEFAULT 0,
    comments_count INTEGER NOT NULL DEFAULT 0,
    reports_count INTEGER NOT NULL DEFAULT 0,
    delta_views_count INTEGER NOT NULL DEFAULT 0,
    delta_likes_count INTEGER NOT NULL DEFAULT 0,
    delta_comments_count INTEGER NOT NULL DEFAULT 0,
    delta_reports_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_videos_creator ON videos(creator_id);
CREATE INDEX IF NOT EXISTS idx_snapshots_video ON video_snapshots(video_id);
CREATE INDEX IF NOT EXISTS idx_snapshots_created ON video_snapshots(created_at);
";

/// Open (or create) the dataset for writing and make sure both tables exist.
pub async fn init_dataset(db_path: &Path) -> Result<Connection, AskError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

pub async fn create_schema(db: &Connection) -> Result<(), AskError> {
    db.call(|conn| -> rusqlite::Result<()> { conn.execute_batch(SCHEMA) })
        .await?;

    Ok(())
}

/// Open a read-only session on the dataset for answering one question.
pub async fn open_session(db_path: &Path) -> Result<Connection, AskError> {
    if !db_path.exists() {
        return Err(AskError::Config(format!(
            "Dataset not found: {}. Load data with --load first.",
            db_path.display()
        )));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    Ok(Connection::open_with_flags(db_path.to_path_buf(), flags).await?)
}

/// Run one statement and return the first column of its first row, if any.
pub async fn fetch_first_value(db: &Connection, sql: &str) -> Result<Option<Value>, AskError> {
    let sql = sql.to_string();
    let value = db
        .call(move |conn| -> rusqlite::Result<Option<Value>> {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let value = match rows.next()? {
                Some(row) => Some(row.get::<_, Value>(0)?),
                None => None,
            };
            Ok(value)
        })
        .await?;

    Ok(value)
}

/// Row counts of both tables, `(videos, snapshots)`.
pub async fn count_rows(db: &Connection) -> Result<(i64, i64), AskError> {
    let counts = db
        .call(|conn| -> rusqlite::Result<(i64, i64)> {
            let videos = conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
            let snapshots =
                conn.query_row("SELECT COUNT(*) FROM video_snapshots", [], |row| row.get(0))?;
            Ok((videos, snapshots))
        })
        .await?;

    Ok(counts)
}

/// Write videos with their snapshots in a single transaction.
///
/// Existing rows with the same id are replaced, so a reload refreshes the
/// dataset instead of failing.
pub async fn batch_insert_videos(
    db: &Connection,
    items: Vec<(Video, Vec<VideoSnapshot>)>,
    loaded_at: String,
    progress: Option<ProgressBar>,
) -> Result<LoadReport, AskError> {
    use rusqlite::params;

    if items.is_empty() {
        return Ok(LoadReport::default());
    }

    let report = db
        .call(move |conn| -> rusqlite::Result<LoadReport> {
            let tx = conn.transaction()?;
            let mut report = LoadReport::default();
            {
                let mut video_stmt = tx.prepare(
                    "INSERT OR REPLACE INTO videos (id, creator_id, video_created_at, views_count, likes_count,
                        comments_count, reports_count, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )?;
                let mut snapshot_stmt = tx.prepare(
                    "INSERT OR REPLACE INTO video_snapshots (id, video_id, views_count, likes_count,
                        comments_count, reports_count, delta_views_count, delta_likes_count,
                        delta_comments_count, delta_reports_count, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )?;

                for (video, snapshots) in items {
                    video_stmt.execute(params![
                        video.id,
                        video.creator_id,
                        video.video_created_at,
                        video.views_count,
                        video.likes_count,
                        video.comments_count,
                        video.reports_count,
                        loaded_at,
                        loaded_at
                    ])?;
                    report.videos += 1;

                    for snap in snapshots {
                        snapshot_stmt.execute(params![
                            snap.id,
                            snap.video_id,
                            snap.views_count,
                            snap.likes_count,
                            snap.comments_count,
                            snap.reports_count,
                            snap.delta_views_count,
                            snap.delta_likes_count,
                            snap.delta_comments_count,
                            snap.delta_reports_count,
                            snap.created_at,
                            loaded_at
                        ])?;
                        report.snapshots += 1;
                    }

                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                }
            }
            tx.commit()?;
            Ok(report)
        })
        .await?;

    Ok(report)
}
