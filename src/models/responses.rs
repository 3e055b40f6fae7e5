use serde::{Deserialize, Serialize};
use crate::models::domain::{CourseSummary, RankedRecord, RankingKey, ScoredRecord, SortDirection, WeightConfig};

/// Leaderboard for one course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(rename = "courseId")]
    pub course_id: Option<i64>,
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
    pub weights: WeightConfig,
    pub key: RankingKey,
    pub direction: SortDirection,
    pub ranking: Vec<RankedRecord<ScoredRecord>>,
    pub total_results: usize,
}

/// Response for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "courseId")]
    pub course_id: i64,
    #[serde(rename = "courseName")]
    pub course_name: String,
    pub revision: i64,
    #[serde(rename = "studentCount")]
    pub student_count: usize,
}

/// Course listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesResponse {
    pub courses: Vec<CourseSummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_rankings: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(rename = "courseId")]
    pub course_id: i64,
}
