//! Post handlers

use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, AuthUser};
use crate::AppState;
use axum::{extract::State, Json};
use postbox_core::{Detail, PostCreate, PostCreated, PostResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeletePostParams {
    #[serde(rename = "postID")]
    post_id: i64,
}

pub async fn add_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<PostCreate>,
) -> Result<Json<PostCreated>, ApiError> {
    let post = state.post_service.add_post(&user, &req.text).await?;

    Ok(Json(PostCreated { post_id: post.id }))
}

pub async fn get_posts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.post_service.get_posts(&user).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(params): ApiQuery<DeletePostParams>,
) -> Result<Json<Detail>, ApiError> {
    state.post_service.delete_post(&user, params.post_id).await?;

    Ok(Json(Detail::new("Post deleted")))
}
