//! Public post endpoints. Premium posts are gated inline with the same
//! minimum-tier check the route layers use.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use blog_access_core::error::BlogError;
use blog_access_core::gate::{check_minimum_tier, Decision};
use blog_access_core::ports::PostRecord;
use blog_access_core::principal::Principal;
use blog_access_core::tier::Tier;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::plan_gate::denial_response;
use crate::state::AppState;

/// Premium posts need at least this tier.
pub const PREMIUM_POST_TIER: Tier = Tier::Pro;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub tags: Vec<String>,
    pub premium: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&PostRecord> for PostSummary {
    fn from(p: &PostRecord) -> Self {
        Self {
            slug: p.slug.clone(),
            title: p.title.clone(),
            tags: p.tags.clone(),
            premium: p.premium,
            updated_at: p.updated_at,
        }
    }
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let posts = state.posts.list_published().await?;
    let summaries: Vec<PostSummary> = posts.iter().map(PostSummary::from).collect();
    Ok(Json(serde_json::json!({ "success": true, "posts": summaries })))
}

pub async fn get_post(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| BlogError::NotFound(format!("post {slug}")))?;

    if post.premium {
        let principal = principal.as_ref().map(|Extension(p)| p);
        if let Decision::Deny(denial) = check_minimum_tier(principal, PREMIUM_POST_TIER) {
            return Ok(denial_response(&denial));
        }
    }

    Ok(Json(serde_json::json!({ "success": true, "post": post })).into_response())
}
