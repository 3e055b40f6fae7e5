use serde::{Deserialize, Serialize};

/// One student row as supplied by the spreadsheet
///
/// Absent cells are read as zero before they get here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputRecord {
    pub name: String,
    #[serde(rename = "workScore", default)]
    pub work_score: f64,
    #[serde(rename = "examScore", default)]
    pub exam_score: f64,
    #[serde(rename = "makeupExamScore", default)]
    pub makeup_exam_score: f64,
}

impl ScoreInputRecord {
    pub fn new(name: impl Into<String>, work_score: f64, exam_score: f64, makeup_exam_score: f64) -> Self {
        Self {
            name: name.into(),
            work_score,
            exam_score,
            makeup_exam_score,
        }
    }
}

/// Per-course grading weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Cap applied to the work score
    #[serde(rename = "maxWorkWeight")]
    pub max_work_weight: f64,
    /// Contribution the exam is rescaled onto
    #[serde(rename = "targetExamWeight")]
    pub target_exam_weight: f64,
    /// Scale the exam was originally graded on, never zero
    #[serde(rename = "baseExamWeight")]
    pub base_exam_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            max_work_weight: 4.0,
            target_exam_weight: 6.0,
            base_exam_weight: 10.0,
        }
    }
}

/// Normalized grade for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub name: String,
    #[serde(rename = "workScoreRaw")]
    pub work_score_raw: f64,
    #[serde(rename = "examScoreRaw")]
    pub exam_score_raw: f64,
    #[serde(rename = "makeupExamScoreRaw")]
    pub makeup_exam_score_raw: f64,
    #[serde(rename = "officialWorkScore")]
    pub official_work_score: f64,
    #[serde(rename = "effectiveExamScore")]
    pub effective_exam_score: f64,
    #[serde(rename = "weightedExamScore")]
    pub weighted_exam_score: f64,
    #[serde(rename = "workOverflow")]
    pub work_overflow: f64,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
}

/// A record annotated with its leaderboard position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord<T> {
    pub position: usize,
    #[serde(flatten)]
    pub record: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Numeric fields of a [`ScoredRecord`] a leaderboard can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingKey {
    #[default]
    FinalScore,
    WeightedExamScore,
    OfficialWorkScore,
    EffectiveExamScore,
    WorkOverflow,
}

impl RankingKey {
    pub const ALL: [RankingKey; 5] = [
        RankingKey::FinalScore,
        RankingKey::WeightedExamScore,
        RankingKey::OfficialWorkScore,
        RankingKey::EffectiveExamScore,
        RankingKey::WorkOverflow,
    ];

    /// Typed accessor for this key
    pub fn extractor(self) -> fn(&ScoredRecord) -> f64 {
        match self {
            RankingKey::FinalScore => |r: &ScoredRecord| r.final_score,
            RankingKey::WeightedExamScore => |r: &ScoredRecord| r.weighted_exam_score,
            RankingKey::OfficialWorkScore => |r: &ScoredRecord| r.official_work_score,
            RankingKey::EffectiveExamScore => |r: &ScoredRecord| r.effective_exam_score,
            RankingKey::WorkOverflow => |r: &ScoredRecord| r.work_overflow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKey::FinalScore => "finalScore",
            RankingKey::WeightedExamScore => "weightedExamScore",
            RankingKey::OfficialWorkScore => "officialWorkScore",
            RankingKey::EffectiveExamScore => "effectiveExamScore",
            RankingKey::WorkOverflow => "workOverflow",
        }
    }
}

/// Persisted course with its grading weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub weights: WeightConfig,
    /// Incremented each time the roster is replaced
    pub revision: i64,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Course listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub weights: WeightConfig,
    #[serde(rename = "studentCount")]
    pub student_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(final_score: f64) -> ScoredRecord {
        ScoredRecord {
            name: "Ana".to_string(),
            work_score_raw: 5.0,
            exam_score_raw: 6.0,
            makeup_exam_score_raw: 0.0,
            official_work_score: 4.0,
            effective_exam_score: 6.0,
            weighted_exam_score: 3.6,
            work_overflow: 1.0,
            final_score,
        }
    }

    #[test]
    fn test_ranking_key_extractors() {
        let record = scored(8.6);
        assert_eq!(RankingKey::FinalScore.extractor()(&record), 8.6);
        assert_eq!(RankingKey::WeightedExamScore.extractor()(&record), 3.6);
        assert_eq!(RankingKey::OfficialWorkScore.extractor()(&record), 4.0);
        assert_eq!(RankingKey::EffectiveExamScore.extractor()(&record), 6.0);
        assert_eq!(RankingKey::WorkOverflow.extractor()(&record), 1.0);
    }

    #[test]
    fn test_ranked_record_serializes_flat() {
        let ranked = RankedRecord { position: 2, record: scored(8.6) };
        let json = serde_json::to_value(&ranked).unwrap();

        assert_eq!(json["position"], 2);
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["finalScore"], 8.6);
    }

    #[test]
    fn test_direction_and_key_parsing() {
        let dir: SortDirection = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(dir, SortDirection::Ascending);
        let dir: SortDirection = serde_json::from_str("\"descending\"").unwrap();
        assert_eq!(dir, SortDirection::Descending);
        assert_eq!(SortDirection::default(), SortDirection::Descending);

        let key: RankingKey = serde_json::from_str("\"weightedExamScore\"").unwrap();
        assert_eq!(key, RankingKey::WeightedExamScore);
        assert_eq!(key.as_str(), "weightedExamScore");
    }

    #[test]
    fn test_input_defaults_missing_scores_to_zero() {
        let input: ScoreInputRecord = serde_json::from_str(r#"{"name": "Bia", "examScore": 7.0}"#).unwrap();
        assert_eq!(input.work_score, 0.0);
        assert_eq!(input.exam_score, 7.0);
        assert_eq!(input.makeup_exam_score, 0.0);
    }
}
