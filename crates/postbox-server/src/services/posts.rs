//! Post service
//!
//! Reads go through the per-user cache; every successful write drops the
//! writer's cache entry before returning.

use crate::storage::PostCache;
use postbox_core::ports::CredentialStore;
use postbox_core::validation::validate_post_text;
use postbox_core::{Post, PostboxError, Result, User};
use std::sync::Arc;
use tracing::{debug, info};

pub struct PostService {
    store: Arc<dyn CredentialStore>,
    cache: Arc<PostCache>,
}

impl PostService {
    pub fn new(store: Arc<dyn CredentialStore>, cache: Arc<PostCache>) -> Self {
        Self { store, cache }
    }

    pub async fn add_post(&self, user: &User, text: &str) -> Result<Post> {
        validate_post_text(text)?;

        let post = self.store.create_post(user.id, text).await?;
        self.cache.invalidate(user.id);

        info!("User {} created post {}", user.id, post.id);
        Ok(post)
    }

    pub async fn get_posts(&self, user: &User) -> Result<Vec<Post>> {
        if let Some(posts) = self.cache.get(user.id) {
            debug!("Post cache hit for user {}", user.id);
            return Ok(posts);
        }

        debug!("Post cache miss for user {}", user.id);
        let posts = self.store.list_posts(user.id).await?;
        self.cache.put(user.id, posts.clone());

        Ok(posts)
    }

    pub async fn delete_post(&self, user: &User, post_id: i64) -> Result<()> {
        if !self.store.delete_post(post_id, user.id).await? {
            return Err(PostboxError::PostNotFound);
        }
        self.cache.invalidate(user.id);

        info!("User {} deleted post {}", user.id, post_id);
        Ok(())
    }
}
