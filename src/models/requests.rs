use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{RankingKey, SortDirection, WeightConfig};

/// Query parameters for a spreadsheet upload
///
/// Weights left out fall back to the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadQuery {
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "course_name", rename = "courseName")]
    pub course_name: String,
    #[serde(alias = "max_work_weight", rename = "maxWorkWeight")]
    pub max_work_weight: Option<f64>,
    #[serde(alias = "target_exam_weight", rename = "targetExamWeight")]
    pub target_exam_weight: Option<f64>,
    #[serde(alias = "base_exam_weight", rename = "baseExamWeight")]
    pub base_exam_weight: Option<f64>,
}

/// Query parameters for a ranking preview; nothing is persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewQuery {
    #[serde(alias = "max_work_weight", rename = "maxWorkWeight")]
    pub max_work_weight: Option<f64>,
    #[serde(alias = "target_exam_weight", rename = "targetExamWeight")]
    pub target_exam_weight: Option<f64>,
    #[serde(alias = "base_exam_weight", rename = "baseExamWeight")]
    pub base_exam_weight: Option<f64>,
    #[serde(default)]
    pub key: RankingKey,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Query parameters for reading a course leaderboard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub key: RankingKey,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Merge optional weight overrides onto a set of defaults
pub fn resolve_weights(
    defaults: &WeightConfig,
    max_work_weight: Option<f64>,
    target_exam_weight: Option<f64>,
    base_exam_weight: Option<f64>,
) -> WeightConfig {
    WeightConfig {
        max_work_weight: max_work_weight.unwrap_or(defaults.max_work_weight),
        target_exam_weight: target_exam_weight.unwrap_or(defaults.target_exam_weight),
        base_exam_weight: base_exam_weight.unwrap_or(defaults.base_exam_weight),
    }
}

impl UploadQuery {
    pub fn weights(&self, defaults: &WeightConfig) -> WeightConfig {
        resolve_weights(defaults, self.max_work_weight, self.target_exam_weight, self.base_exam_weight)
    }
}

impl PreviewQuery {
    pub fn weights(&self, defaults: &WeightConfig) -> WeightConfig {
        resolve_weights(defaults, self.max_work_weight, self.target_exam_weight, self.base_exam_weight)
    }
}
