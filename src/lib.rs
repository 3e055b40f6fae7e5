//! Grade Rank - weighted grade computation and course leaderboards
//!
//! The core turns raw spreadsheet scores into bounded final grades and ranks
//! students with a stable merge sort and shared positions for ties. The
//! service layer around it ingests CSV uploads, stores courses in PostgreSQL
//! and serves leaderboards over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{normalize, rank_by, CoreError, Leaderboard};
pub use models::{ScoreInputRecord, WeightConfig, ScoredRecord, RankedRecord, SortDirection, RankingKey};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let scored = normalize(&ScoreInputRecord::new("Ana", 5.0, 6.0, 0.0), &WeightConfig::default()).unwrap();
        assert_eq!(scored.final_score, 8.6);
    }
}
