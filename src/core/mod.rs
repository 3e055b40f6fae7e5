// Core algorithm exports
pub mod leaderboard;
pub mod merge_sort;
pub mod normalizer;
pub mod ranking;

use thiserror::Error;

pub use leaderboard::Leaderboard;
pub use merge_sort::sort_by_key;
pub use normalizer::{normalize, normalize_batch, round2, MAX_FINAL_SCORE};
pub use ranking::{rank_by, try_rank_by, assign_positions};

/// Errors raised by grade normalization and ranking
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid weight configuration: {0}")]
    Configuration(String),

    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
