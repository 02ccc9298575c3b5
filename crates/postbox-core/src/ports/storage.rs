//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use postbox_types::{Post, User};

/// Durable users and posts.
///
/// Every post's `owner_id` must reference an existing user.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with `DuplicateEmail` if the email is already taken.
    async fn create_user(&self, email: &str, password: &str) -> Result<User>;

    /// `None` on unknown email or wrong password, without saying which.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn create_post(&self, owner_id: i64, text: &str) -> Result<Post>;

    /// Posts of one owner, oldest first.
    async fn list_posts(&self, owner_id: i64) -> Result<Vec<Post>>;

    /// Deletes only when the post exists and belongs to `owner_id`.
    /// Returns whether a row was removed.
    async fn delete_post(&self, id: i64, owner_id: i64) -> Result<bool>;
}
