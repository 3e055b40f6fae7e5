use crate::core::CoreError;
use crate::models::{ScoreInputRecord, ScoredRecord, WeightConfig};

/// Ceiling applied to every final grade
pub const MAX_FINAL_SCORE: f64 = 10.0;

impl WeightConfig {
    /// Check the weights can be used to normalize a batch
    ///
    /// A zero exam base would divide by zero; negative or non-finite weights
    /// would break the `0 <= final <= 10` bound.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("maxWorkWeight", self.max_work_weight),
            ("targetExamWeight", self.target_exam_weight),
            ("baseExamWeight", self.base_exam_weight),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::Configuration(format!("{} must be a finite number", field)));
            }
            if value < 0.0 {
                return Err(CoreError::Configuration(format!("{} cannot be negative (got {})", field, value)));
            }
        }

        if self.base_exam_weight == 0.0 {
            return Err(CoreError::Configuration("baseExamWeight cannot be zero".to_string()));
        }

        Ok(())
    }
}

/// Round to two decimal places, half away from zero
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the final grade for one student
///
/// Formula:
/// ```text
/// official  = min(work, maxWorkWeight)
/// overflow  = max(0, work - maxWorkWeight)
/// effective = max(exam, makeup)
/// weighted  = effective / baseExamWeight * targetExamWeight
/// final     = min(official + weighted + overflow, 10)
/// ```
/// Intermediate values stay at full precision; each output field is rounded once.
/// Scores must be finite and non-negative; anything else is an `InvalidRecord`.
pub fn normalize(input: &ScoreInputRecord, config: &WeightConfig) -> Result<ScoredRecord, CoreError> {
    config.validate()?;
    check_scores(0, input)?;
    Ok(normalize_unchecked(input, config))
}

/// Normalize a batch, validating the weights once before touching any record
pub fn normalize_batch(inputs: &[ScoreInputRecord], config: &WeightConfig) -> Result<Vec<ScoredRecord>, CoreError> {
    config.validate()?;
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            check_scores(index, input)?;
            Ok(normalize_unchecked(input, config))
        })
        .collect()
}

/// Reject scores `min`/`max` would silently absorb
///
/// `f64::min` returns the other operand when one side is NaN, so a NaN work
/// score would otherwise earn full work credit.
pub(crate) fn check_scores(index: usize, input: &ScoreInputRecord) -> Result<(), CoreError> {
    let fields = [
        ("workScore", input.work_score),
        ("examScore", input.exam_score),
        ("makeupExamScore", input.makeup_exam_score),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            return Err(CoreError::InvalidRecord {
                index,
                reason: format!("{} must be a finite number", field),
            });
        }
        if value < 0.0 {
            return Err(CoreError::InvalidRecord {
                index,
                reason: format!("{} cannot be negative (got {})", field, value),
            });
        }
    }

    Ok(())
}

/// Caller guarantees `config.validate()` and `check_scores` have passed.
pub(crate) fn normalize_unchecked(input: &ScoreInputRecord, config: &WeightConfig) -> ScoredRecord {
    let official_work_score = input.work_score.min(config.max_work_weight);
    let work_overflow = (input.work_score - config.max_work_weight).max(0.0);

    let effective_exam_score = input.exam_score.max(input.makeup_exam_score);
    let weighted_exam_score = (effective_exam_score / config.base_exam_weight) * config.target_exam_weight;

    let final_score = (official_work_score + weighted_exam_score + work_overflow).min(MAX_FINAL_SCORE);

    ScoredRecord {
        name: input.name.clone(),
        work_score_raw: input.work_score,
        exam_score_raw: input.exam_score,
        makeup_exam_score_raw: input.makeup_exam_score,
        official_work_score: round2(official_work_score),
        effective_exam_score: round2(effective_exam_score),
        weighted_exam_score: round2(weighted_exam_score),
        work_overflow: round2(work_overflow),
        final_score: round2(final_score),
    }
}
