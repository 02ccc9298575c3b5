//! Post types

use serde::{Deserialize, Serialize};

/// Maximum post length, counted in characters.
pub const MAX_POST_CHARS: usize = 1_000_000;

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub owner_id: i64,
}

/// Add-post request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub text: String,
}

/// Add-post response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreated {
    #[serde(rename = "postID")]
    pub post_id: i64,
}

/// Client-facing view of a post; the owner is implied by the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub text: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text: post.text,
        }
    }
}

/// Plain confirmation message, e.g. after a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
