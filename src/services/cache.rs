use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use crate::models::{RankedRecord, RankingKey, ScoredRecord, SortDirection};

pub type CachedRanking = Arc<Vec<RankedRecord<ScoredRecord>>>;

/// In-memory cache of computed leaderboards
///
/// Keys carry the course revision, so a leaderboard computed from an older
/// roster is never looked up again once an upload bumps the revision, even if
/// it lands in the cache after the upload. [`RankingCache::invalidate_course`]
/// only frees the superseded entries early.
pub struct RankingCache {
    inner: moka::future::Cache<String, CachedRanking>,
}

impl RankingCache {
    /// Create a new ranking cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<CachedRanking> {
        let hit = self.inner.get(key).await;
        tracing::trace!("Ranking cache {}: {}", if hit.is_some() { "hit" } else { "miss" }, key);
        hit
    }

    pub async fn insert(&self, key: String, ranking: CachedRanking) {
        self.inner.insert(key, ranking).await;
    }

    /// Drop every cached leaderboard for one revision of a course
    pub async fn invalidate_course(&self, course_id: i64, revision: i64) {
        for key in RankingKey::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                self.inner
                    .invalidate(&RankingCacheKey::ranking(course_id, revision, key, direction))
                    .await;
            }
        }
        tracing::debug!("Invalidated cached rankings for course {} revision {}", course_id, revision);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.inner.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct RankingCacheKey;

impl RankingCacheKey {
    /// Build a cache key for one course leaderboard ordering
    pub fn ranking(course_id: i64, revision: i64, key: RankingKey, direction: SortDirection) -> String {
        format!("ranking:{}:r{}:{}:{}", course_id, revision, key.as_str(), direction.as_str())
    }
}
