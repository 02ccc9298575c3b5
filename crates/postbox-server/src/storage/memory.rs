//! In-memory post cache using moka
//!
//! Maps a user id to that user's post list as last read from the database.
//! Entries expire a fixed time after insertion and the number of users held
//! is bounded, least recently used first out. There is no cleanup task;
//! pending expirations and evictions are applied on write and on `len`.

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use postbox_core::Post;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Per-user post list cache with TTL and a capacity bound
pub struct PostCache {
    entries: Cache<i64, Vec<Post>>,
}

impl PostCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity.max(1) as u64)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|user_id: Arc<i64>, _, cause: RemovalCause| {
                if cause.was_evicted() {
                    debug!(user_id = *user_id, ?cause, "post cache entry evicted");
                }
            })
            .build();

        Self { entries }
    }

    /// Get a user's posts if cached and not yet expired
    pub fn get(&self, user_id: i64) -> Option<Vec<Post>> {
        self.entries.get(&user_id)
    }

    /// Insert or replace a user's posts, restarting the entry's TTL
    pub fn put(&self, user_id: i64, posts: Vec<Post>) {
        self.entries.insert(user_id, posts);
        // Apply the capacity bound now rather than on moka's own schedule.
        self.entries.run_pending_tasks();
    }

    /// Drop a user's entry; no-op if absent
    pub fn invalidate(&self, user_id: i64) {
        if self.entries.remove(&user_id).is_some() {
            debug!(user_id, "post cache entry invalidated");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PostCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}
