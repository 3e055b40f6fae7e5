use crate::models::{ScoreInputRecord, ScoredRecord, WeightConfig, RankedRecord, RankingKey, SortDirection};
use crate::core::{
    normalizer::{check_scores, normalize_unchecked},
    ranking::rank_by,
    CoreError,
};

/// Grades and ranks one course's students
///
/// # Pipeline Stages
/// 1. Weight validation (once, at construction)
/// 2. Per-student normalization
/// 3. Stable sort and position assignment
///
/// Ties are judged on the rounded two-decimal scores, the same values that
/// are stored and shown to students.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    weights: WeightConfig,
}

impl Leaderboard {
    pub fn new(weights: WeightConfig) -> Result<Self, CoreError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Normalize every row, failing on the first non-finite or negative score
    pub fn score(&self, inputs: &[ScoreInputRecord]) -> Result<Vec<ScoredRecord>, CoreError> {
        let scored = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                check_scores(index, input)?;
                Ok(normalize_unchecked(input, &self.weights))
            })
            .collect::<Result<Vec<ScoredRecord>, CoreError>>()?;

        tracing::debug!("Normalized {} student records", scored.len());
        Ok(scored)
    }

    /// Order scored records by `key` and assign positions
    pub fn rank(
        &self,
        scored: Vec<ScoredRecord>,
        key: RankingKey,
        direction: SortDirection,
    ) -> Result<Vec<RankedRecord<ScoredRecord>>, CoreError> {
        let ranked = rank_by(scored, key.extractor(), direction)?;

        tracing::debug!(
            "Ranked {} students by {} ({})",
            ranked.len(),
            key.as_str(),
            direction.as_str()
        );

        Ok(ranked)
    }

    /// Normalize and rank in one go
    pub fn build(
        &self,
        inputs: &[ScoreInputRecord],
        key: RankingKey,
        direction: SortDirection,
    ) -> Result<Vec<RankedRecord<ScoredRecord>>, CoreError> {
        self.rank(self.score(inputs)?, key, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, work: f64, exam: f64, makeup: f64) -> ScoreInputRecord {
        ScoreInputRecord::new(name, work, exam, makeup)
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let weights = WeightConfig {
            max_work_weight: 4.0,
            target_exam_weight: 6.0,
            base_exam_weight: 0.0,
        };

        assert!(matches!(Leaderboard::new(weights), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_build_orders_by_final_score() {
        let board = Leaderboard::new(WeightConfig::default()).unwrap();
        let inputs = vec![
            input("Ana", 4.0, 5.0, 0.0),  // 7.0
            input("Bia", 4.0, 10.0, 0.0), // 10.0
            input("Caio", 3.0, 0.0, 5.0), // 6.0
        ];

        let ranked = board.build(&inputs, RankingKey::FinalScore, SortDirection::Descending).unwrap();

        let names: Vec<&str> = ranked.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["Bia", "Ana", "Caio"]);
        assert_eq!(ranked[0].record.final_score, 10.0);
        assert_eq!(ranked[2].position, 3);
    }

    #[test]
    fn test_rounded_scores_tie() {
        let board = Leaderboard::new(WeightConfig {
            max_work_weight: 4.0,
            target_exam_weight: 6.0,
            base_exam_weight: 9.0,
        })
        .unwrap();

        // 7/9*6 = 4.6667 and 7.001/9*6 = 4.6673 both display as 4.67
        let inputs = vec![
            input("Duda", 1.0, 7.0, 0.0),
            input("Edu", 1.0, 7.001, 0.0),
        ];

        let ranked = board.build(&inputs, RankingKey::FinalScore, SortDirection::Descending).unwrap();
        assert_eq!(ranked[0].record.name, "Duda");
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[1].position, 1);
    }

    #[test]
    fn test_rank_by_other_key() {
        let board = Leaderboard::new(WeightConfig::default()).unwrap();
        let inputs = vec![
            input("Ana", 6.0, 1.0, 0.0),
            input("Bia", 4.5, 1.0, 0.0),
        ];

        let ranked = board.build(&inputs, RankingKey::WorkOverflow, SortDirection::Ascending).unwrap();
        assert_eq!(ranked[0].record.name, "Bia");
        assert_eq!(ranked[0].record.work_overflow, 0.5);
        assert_eq!(ranked[1].record.work_overflow, 2.0);
    }

    #[test]
    fn test_nan_score_rejected_with_index() {
        let board = Leaderboard::new(WeightConfig::default()).unwrap();
        let inputs = vec![
            input("Ana", 4.0, 5.0, 0.0),
            input("Bia", f64::NAN, 5.0, 0.0),
        ];

        let result = board.build(&inputs, RankingKey::FinalScore, SortDirection::Descending);
        assert!(matches!(result, Err(CoreError::InvalidRecord { index: 1, .. })));
    }
}
