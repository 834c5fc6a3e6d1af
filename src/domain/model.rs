use serde::{Serialize, Serializer};
use std::fmt;

// 单值答案
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    #[serde(serialize_with = "serialize_blob")]
    Blob(Vec<u8>),
}

fn serialize_blob<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl Scalar {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Integer(_) | Scalar::Float(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Blob(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

// 一次提问的完整结果
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub sql: String,
    pub value: Scalar,
    pub source: AnswerSource,
    pub answered_at: i64,
}

// 答案来源
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AnswerSource {
    Database,
    Cache,
}

// 视频（最终累计值）
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: String,
    pub creator_id: String,
    pub video_created_at: String,
    pub views_count: i64,
    pub likes_count: i64,
    pub comments_count: i64,
    pub reports_count: i64,
}

// 每小时快照（累计值 + 增量）
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSnapshot {
    pub id: String,
    pub video_id: String,
    pub views_count: i64,
    pub likes_count: i64,
    pub comments_count: i64,
    pub reports_count: i64,
    pub delta_views_count: i64,
    pub delta_likes_count: i64,
    pub delta_comments_count: i64,
    pub delta_reports_count: i64,
    pub created_at: String,
}

/// Row counts written by one dataset load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub videos: usize,
    pub snapshots: usize,
}
