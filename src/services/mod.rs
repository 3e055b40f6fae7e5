// Service exports
pub mod cache;
pub mod ingest;
pub mod postgres;

pub use cache::{RankingCache, RankingCacheKey, CacheStats, CachedRanking};
pub use ingest::{parse_scores, IngestError};
pub use postgres::{GradebookStore, StoreError};
